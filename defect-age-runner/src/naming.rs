// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deriving human-readable class and test names from qualified names.

/// The class name used when a qualified name has no separator.
pub const UNKNOWN_CLASS: &str = "UnknownClass";

/// A class name and test name derived from a qualified name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestNames {
    /// The class, suite or feature the test belongs to.
    pub class_name: String,

    /// The short test name.
    pub test_name: String,
}

/// Splits qualified names such as `com.example.LoginTest.testLogin` into a class name and a test
/// name at the rightmost occurrence of any configured separator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NameSplitter {
    separators: Vec<String>,
}

impl NameSplitter {
    /// Creates a new splitter. Empty separators are ignored.
    pub fn new(separators: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let separators = separators
            .into_iter()
            .map(Into::into)
            .filter(|sep: &String| !sep.is_empty())
            .collect();
        Self { separators }
    }

    /// Returns the configured separators.
    pub fn separators(&self) -> &[String] {
        &self.separators
    }

    /// Splits `qualified_name` into class and test names.
    ///
    /// A name without a separator, or whose rightmost separator leaves either side empty, produces
    /// [`UNKNOWN_CLASS`] and the whole name as the test name.
    pub fn split(&self, qualified_name: &str) -> TestNames {
        // Pick the match that ends rightmost; on a tie the longer separator wins so that, for
        // example, `::` is preferred over `:`.
        let split_at = self
            .separators
            .iter()
            .filter_map(|sep| {
                qualified_name
                    .rfind(sep.as_str())
                    .map(|idx| (idx + sep.len(), sep.len()))
            })
            .max();

        if let Some((end, sep_len)) = split_at {
            let class_name = &qualified_name[..end - sep_len];
            let test_name = &qualified_name[end..];
            if !class_name.is_empty() && !test_name.is_empty() {
                return TestNames {
                    class_name: class_name.to_owned(),
                    test_name: test_name.to_owned(),
                };
            }
        }

        TestNames {
            class_name: UNKNOWN_CLASS.to_owned(),
            test_name: qualified_name.to_owned(),
        }
    }
}

impl Default for NameSplitter {
    fn default() -> Self {
        Self::new([".", "#"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("com.example.LoginTest.testLogin", "com.example.LoginTest", "testLogin" ; "dotted")]
    #[test_case("tests.test_login#test_ok", "tests.test_login", "test_ok" ; "hash is rightmost")]
    #[test_case("pkg#Suite.case", "pkg#Suite", "case" ; "dot is rightmost")]
    #[test_case("testLogin", UNKNOWN_CLASS, "testLogin" ; "no separator")]
    #[test_case("Feature: login works", UNKNOWN_CLASS, "Feature: login works" ; "feature name")]
    #[test_case("LoginTest.", UNKNOWN_CLASS, "LoginTest." ; "trailing separator")]
    #[test_case(".testLogin", UNKNOWN_CLASS, ".testLogin" ; "leading separator")]
    #[test_case("", UNKNOWN_CLASS, "" ; "empty")]
    fn split_default(input: &str, class_name: &str, test_name: &str) {
        let names = NameSplitter::default().split(input);
        assert_eq!(names.class_name, class_name);
        assert_eq!(names.test_name, test_name);
    }

    #[test]
    fn longer_separator_wins_tie() {
        let splitter = NameSplitter::new([":", "::"]);
        let names = splitter.split("crate::module::test_it");
        assert_eq!(names.class_name, "crate::module");
        assert_eq!(names.test_name, "test_it");
    }

    #[test]
    fn no_separators_never_split() {
        let splitter = NameSplitter::new(["", ""]);
        assert!(splitter.separators().is_empty());
        let names = splitter.split("a.b.c");
        assert_eq!(names.class_name, UNKNOWN_CLASS);
        assert_eq!(names.test_name, "a.b.c");
    }
}
