use std::fmt::Debug;

/// Maps controllers to documentation file names and back.
pub trait FileNaming: Debug + Send + Sync {
    /// File name, without directory, holding the examples of `controller`.
    fn file_name(&self, controller: &str) -> String;

    /// Controller stored in `file_name`, or `None` if the file is not a documentation file.
    fn controller_for(&self, file_name: &str) -> Option<String>;
}

/// Default naming: `/` in the controller becomes `:`, followed by the extension.
///
/// ```rust
/// use apidocs_core::persist::{ControllerFileNaming, FileNaming};
///
/// let naming = ControllerFileNaming::default();
///
/// assert_eq!(naming.file_name("admin/users"), "admin:users.yml");
/// assert_eq!(naming.controller_for("admin:users.yml").as_deref(), Some("admin/users"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerFileNaming {
    extension: String,
}

impl Default for ControllerFileNaming {
    fn default() -> Self {
        Self {
            extension: "yml".to_string(),
        }
    }
}

impl ControllerFileNaming {
    /// Uses `extension` (without the leading dot) instead of `yml`.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }
}

impl FileNaming for ControllerFileNaming {
    fn file_name(&self, controller: &str) -> String {
        format!("{}.{}", controller.replace('/', ":"), self.extension)
    }

    fn controller_for(&self, file_name: &str) -> Option<String> {
        let stem = file_name
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        // hidden files include our own temporary files
        if stem.is_empty() || stem.starts_with('.') {
            return None;
        }
        Some(stem.replace(':', "/"))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("users", "users.yml")]
    #[case("admin/users", "admin:users.yml")]
    #[case("api/v1/users/posts", "api:v1:users:posts.yml")]
    fn should_name_controller_files(#[case] controller: &str, #[case] file_name: &str) {
        let naming = ControllerFileNaming::default();

        assert_eq!(naming.file_name(controller), file_name);
        assert_eq!(naming.controller_for(file_name).as_deref(), Some(controller));
    }

    #[rstest]
    #[case::other_extension("users.json")]
    #[case::no_extension("users")]
    #[case::hidden(".users.yml.tmp")]
    #[case::hidden_stem(".users.yml")]
    #[case::empty_stem(".yml")]
    #[case::glued_extension("usersyml")]
    fn should_ignore_foreign_files(#[case] file_name: &str) {
        let naming = ControllerFileNaming::default();

        assert_eq!(naming.controller_for(file_name), None);
    }

    #[test]
    fn should_use_custom_extension() {
        let naming = ControllerFileNaming::default().with_extension(".yaml");

        assert_eq!(naming.file_name("users"), "users.yaml");
        assert_eq!(naming.controller_for("users.yaml").as_deref(), Some("users"));
        assert_eq!(naming.controller_for("users.yml"), None);
    }
}
