use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

static COURSE_V1_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^course-v1:(?P<org>[\w\-~.:]+)\+(?P<course>[\w\-~.:]+)\+(?P<run>[\w\-~.:]+)(?:\+branch@(?P<branch>[\w\-~.:]+))?(?:\+version@(?P<version>[A-Fa-f0-9]{24}))?$",
    )
    .expect("valid course-v1 regex")
});

static DEPRECATED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<org>[\w\-~.:]+)/(?P<course>[\w\-~.:]+)/(?P<run>[\w\-~.:]+)$")
        .expect("valid deprecated course key regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CourseKeyError {
    #[error("Invalid course key")]
    InvalidKey,
}

/// Structured course identifier: organization, course number and run.
///
/// Accepts the `course-v1:{org}+{course}+{run}` form (with optional
/// `+branch@` and `+version@` suffixes) and the deprecated `{org}/{course}/{run}` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseKey {
    org: String,
    course: String,
    run: String,
    branch: Option<String>,
    version: Option<String>,
    deprecated: bool,
}

impl CourseKey {
    pub fn new(org: impl Into<String>, course: impl Into<String>, run: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            course: course.into(),
            run: run.into(),
            branch: None,
            version: None,
            deprecated: false,
        }
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn run(&self) -> &str {
        &self.run
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Same course with branch and version information removed.
    pub fn for_branch_and_version_free(&self) -> Self {
        Self {
            branch: None,
            version: None,
            ..self.clone()
        }
    }
}

impl FromStr for CourseKey {
    type Err = CourseKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some(captures) = COURSE_V1_REGEX.captures(value) {
            return Ok(Self {
                org: captures["org"].to_owned(),
                course: captures["course"].to_owned(),
                run: captures["run"].to_owned(),
                branch: captures.name("branch").map(|m| m.as_str().to_owned()),
                version: captures.name("version").map(|m| m.as_str().to_owned()),
                deprecated: false,
            });
        }

        let captures = DEPRECATED_REGEX
            .captures(value)
            .ok_or(CourseKeyError::InvalidKey)?;

        Ok(Self {
            org: captures["org"].to_owned(),
            course: captures["course"].to_owned(),
            run: captures["run"].to_owned(),
            branch: None,
            version: None,
            deprecated: true,
        })
    }
}

impl TryFrom<&str> for CourseKey {
    type Error = CourseKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deprecated {
            return write!(f, "{}/{}/{}", self.org, self.course, self.run);
        }

        write!(f, "course-v1:{}+{}+{}", self.org, self.course, self.run)?;
        if let Some(branch) = &self.branch {
            write!(f, "+branch@{branch}")?;
        }
        if let Some(version) = &self.version {
            write!(f, "+version@{version}")?;
        }
        Ok(())
    }
}
