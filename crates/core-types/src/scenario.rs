/// A natural-language description plus the display name generated for it.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Scenario {
    pub description: String,
    pub display_name: String,
}

impl Scenario {
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        let display_name = format!("should {}", description.trim().to_lowercase());
        Self {
            description,
            display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_lowercased_should_clause() {
        let scenario = Scenario::new("Visit the Home page");
        assert_eq!(scenario.display_name, "should visit the home page");
        assert_eq!(scenario.description, "Visit the Home page");
    }
}
