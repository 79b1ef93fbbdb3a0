//! Backing models for the listing creation and login forms.

use roehrenboerse_core::category::{require_known_category, DEFAULT_CATEGORY};
use roehrenboerse_core::error::CoreError;
use roehrenboerse_core::listing::{CreateListing, Listing};
use roehrenboerse_core::tags::parse_tags;
use roehrenboerse_core::validation::require_non_blank;

use crate::auth::{AuthError, AuthOutcome};
use crate::error::ClientError;
use crate::session::SessionState;
use crate::state::ListingsState;

/// Minimum password length accepted by the login form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Errors from submitting a form.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// A field failed local validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

// ---------------------------------------------------------------------------
// Listing form
// ---------------------------------------------------------------------------

/// Raw field values of the "new listing" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingForm {
    pub title: String,
    pub price: String,
    pub location: String,
    pub category: String,
    /// Optional badge text; empty means no label.
    pub label: String,
    /// Comma-separated tags as typed.
    pub tags: String,
}

impl Default for ListingForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            price: String::new(),
            location: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            label: String::new(),
            tags: String::new(),
        }
    }
}

impl ListingForm {
    /// Validate the required fields and build the creation payload.
    pub fn to_input(&self) -> Result<CreateListing, CoreError> {
        require_non_blank("title", &self.title)?;
        require_non_blank("price", &self.price)?;
        require_non_blank("category", &self.category)?;
        require_non_blank("location", &self.location)?;
        require_non_blank("tags", &self.tags)?;
        require_known_category(self.category.trim())?;

        let label = self.label.trim();
        Ok(CreateListing {
            title: self.title.trim().to_string(),
            tags: parse_tags(&self.tags),
            price: self.price.trim().to_string(),
            location: self.location.trim().to_string(),
            category: self.category.trim().to_string(),
            label: (!label.is_empty()).then(|| label.to_string()),
            user_id: None,
        })
    }

    /// Submit through the shared state and clear the form on success.
    ///
    /// The form is borrowed mutably for the whole request, so a second
    /// submission cannot start until this one has finished. On failure the
    /// entered values are kept.
    pub async fn submit(&mut self, state: &ListingsState) -> Result<Listing, FormError> {
        let input = self.to_input()?;
        let created = state.create(&input).await?;
        self.reset();
        Ok(created)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Login form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

/// Email/password form that can be toggled between signing in and signing up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub mode: LoginMode,
}

impl LoginForm {
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        };
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        require_non_blank("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(CoreError::Validation(
                "email must be a valid address".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CoreError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }

    /// Validate and send the form in its current mode.
    ///
    /// Provider-side rejections come back as [`AuthOutcome::Failed`]; only
    /// local validation and transport failures are errors. A session issued
    /// by the provider is kept in `session`.
    pub async fn submit(&self, session: &SessionState) -> Result<AuthOutcome, FormError> {
        self.validate()?;
        let email = self.email.trim();
        let outcome = match self.mode {
            LoginMode::SignIn => session.sign_in_with_password(email, &self.password).await?,
            LoginMode::SignUp => session.sign_up(email, &self.password).await?,
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn filled() -> ListingForm {
        ListingForm {
            title: "ECC83 Telefunken".into(),
            price: "120 €".into(),
            location: "Berlin".into(),
            tags: "NOS, getestet".into(),
            ..Default::default()
        }
    }

    #[test]
    fn category_defaults_to_tube() {
        assert_eq!(ListingForm::default().category, "Röhre");
    }

    #[test]
    fn input_splits_tags_and_drops_empty_label() {
        let input = filled().to_input().unwrap();
        assert_eq!(input.tags, vec!["NOS", "getestet"]);
        assert_eq!(input.category, "Röhre");
        assert_eq!(input.label, None);
    }

    #[test]
    fn label_is_kept_when_set() {
        let form = ListingForm {
            label: " Neu ".into(),
            ..filled()
        };
        assert_eq!(form.to_input().unwrap().label.as_deref(), Some("Neu"));
    }

    #[test]
    fn each_required_field_is_checked() {
        let cases: [(&str, fn(&mut ListingForm)); 5] = [
            ("title", |f| f.title.clear()),
            ("price", |f| f.price = "  ".into()),
            ("category", |f| f.category.clear()),
            ("location", |f| f.location.clear()),
            ("tags", |f| f.tags.clear()),
        ];
        for (field, blank) in cases {
            let mut form = filled();
            blank(&mut form);
            assert_matches!(
                form.to_input(),
                Err(CoreError::Validation(ref m)) if m == &format!("{field} must not be empty")
            );
        }
    }

    #[test]
    fn category_must_be_offered_by_the_form() {
        let form = ListingForm {
            category: "Kaffeemaschine".into(),
            ..filled()
        };
        assert_matches!(
            form.to_input(),
            Err(CoreError::Validation(ref m)) if m.starts_with("category must be one of")
        );

        let form = ListingForm {
            category: "Verstärker".into(),
            ..filled()
        };
        assert_eq!(form.to_input().unwrap().category, "Verstärker");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = filled();
        form.reset();
        assert_eq!(form, ListingForm::default());
    }

    #[test]
    fn login_requires_email_and_long_password() {
        let mut form = LoginForm {
            email: "".into(),
            password: "geheim123".into(),
            ..Default::default()
        };
        assert_matches!(form.validate(), Err(CoreError::Validation(_)));

        form.email = "funker@example.de".into();
        assert!(form.validate().is_ok());

        form.password = "12345".into();
        assert_matches!(
            form.validate(),
            Err(CoreError::Validation(ref m)) if m == "password must be at least 6 characters"
        );
    }

    #[test]
    fn mode_toggles() {
        let mut form = LoginForm::default();
        assert_eq!(form.mode, LoginMode::SignIn);
        form.toggle_mode();
        assert_eq!(form.mode, LoginMode::SignUp);
        form.toggle_mode();
        assert_eq!(form.mode, LoginMode::SignIn);
    }
}
