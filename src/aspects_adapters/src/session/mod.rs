pub mod jwt_session_validator;

pub use jwt_session_validator::{
    JwtSessionConfig, JwtSessionValidator, SessionClaims, SessionError, generate_session_token,
};
