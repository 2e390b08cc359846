use thiserror::Error;

/// Failure taxonomy for one fetch-assemble cycle.
///
/// Every variant is recoverable: the poll loop skips the render and the
/// next scheduled cycle retries from scratch. Normal absences (empty seat,
/// zero bet, hidden hand, nobody to act) are data states, not errors.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The identity endpoint refused or could not be reached; the viewer
    /// is effectively not logged in. The game endpoint is never contacted.
    #[error("identity unavailable: {reason}")]
    IdentityUnavailable { reason: String },

    /// Identity resolved, but the game endpoint refused or could not be
    /// reached: logged in, but not in a reachable game.
    #[error("game state unavailable: {reason}")]
    GameUnavailable { reason: String },

    /// The reported game does not seat the viewer anywhere.
    #[error("viewer {username} is not seated in the reported game")]
    ViewerNotSeated { username: String },

    /// A success response whose body did not decode as the expected shape.
    #[error("malformed response from {endpoint}: {detail}")]
    MalformedResponse { endpoint: String, detail: String },
}
