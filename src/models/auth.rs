//! Authentication form models

use serde::Deserialize;
use validator::Validate;

use crate::services::remote::Credentials;

/// Sign-in form
#[derive(Clone, Deserialize, Validate)]
pub struct SignInForm {
    #[serde(deserialize_with = "crate::utils::validation::trimmed")]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl SignInForm {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

/// Sign-up form: new account plus the organisation it will own
#[derive(Clone, Deserialize, Validate)]
pub struct SignUpForm {
    #[serde(deserialize_with = "crate::utils::validation::trimmed")]
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(
        length(min = 1, max = 255, message = "org_name must be 1-255 characters"),
        custom(function = "crate::utils::validation::validate_not_blank")
    )]
    pub org_name: String,
}

impl SignUpForm {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

/// Password reset request form
#[derive(Clone, Deserialize, Validate)]
pub struct ResetPasswordForm {
    #[serde(deserialize_with = "crate::utils::validation::trimmed")]
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

macro_rules! redacted_debug {
    ($ty:ident { $($field:ident),* }) => {
        impl std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($ty))
                    $(.field(stringify!($field), &"[REDACTED]"))*
                    .finish_non_exhaustive()
            }
        }
    };
}

redacted_debug!(SignInForm { email, password });
redacted_debug!(SignUpForm { email, password });
redacted_debug!(ResetPasswordForm { email });
