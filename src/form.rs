//! Contact form input and its validation rules.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionInput {
    pub name: String,
    pub number: String,
    pub email: String,
    pub address: String,
    pub message: String,
}

impl SubmissionInput {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One message per offending field, shown next to its input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub number: Option<&'static str>,
    pub email: Option<&'static str>,
    pub address: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.number.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.message.is_none()
    }
}

/// All five fields are required; email must additionally parse as an address.
pub fn validate(input: &SubmissionInput) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if input.name.trim().is_empty() {
        errors.name = Some("Name is required");
    }
    if input.number.trim().is_empty() {
        errors.number = Some("Phone Number is required");
    }
    if input.email.trim().is_empty() {
        errors.email = Some("Email is required");
    } else if !is_valid_email(input.email.trim()) {
        errors.email = Some("Invalid email");
    }
    if input.address.trim().is_empty() {
        errors.address = Some("Address is required");
    }
    if input.message.trim().is_empty() {
        errors.message = Some("Message is required");
    }
    errors
}

fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() {
        return false;
    }
    let domain = parts[1];
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SubmissionInput {
        SubmissionInput {
            name: "A".into(),
            number: "123".into(),
            email: "a@b.com".into(),
            address: "X".into(),
            message: "hi".into(),
        }
    }

    #[test]
    fn accepts_complete_input() {
        assert!(validate(&filled()).is_empty());
    }

    #[test]
    fn every_missing_field_gets_its_own_message() {
        let errors = validate(&SubmissionInput::default());
        assert_eq!(errors.name, Some("Name is required"));
        assert_eq!(errors.number, Some("Phone Number is required"));
        assert_eq!(errors.email, Some("Email is required"));
        assert_eq!(errors.address, Some("Address is required"));
        assert_eq!(errors.message, Some("Message is required"));
    }

    #[test]
    fn single_missing_field_only_flags_that_field() {
        let mut input = filled();
        input.address = "   ".into();
        let errors = validate(&input);
        assert_eq!(errors.address, Some("Address is required"));
        assert!(errors.name.is_none());
        assert!(errors.number.is_none());
        assert!(errors.email.is_none());
        assert!(errors.message.is_none());
    }

    #[test]
    fn malformed_email_is_rejected_even_when_everything_else_is_set() {
        for bad in ["plainaddress", "a@b", "@b.com", "a@.com", "a@b.", "a@b@c.com"] {
            let mut input = filled();
            input.email = bad.into();
            let errors = validate(&input);
            assert_eq!(errors.email, Some("Invalid email"), "email: {bad}");
        }
    }

    #[test]
    fn reasonable_addresses_pass() {
        for ok in ["a@b.com", "first.last@sub.example.org", "x+tag@mail.co"] {
            let mut input = filled();
            input.email = ok.into();
            assert!(validate(&input).is_empty(), "email: {ok}");
        }
    }

    #[test]
    fn clear_resets_every_field() {
        let mut input = filled();
        input.clear();
        assert_eq!(input, SubmissionInput::default());
    }
}
