use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::platform::expand_platforms;

/// A `(interpreter, abi, platform)` triple identifying one wheel
/// compatibility signature, e.g. `cp39-cp39-manylinux_2_17_x86_64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    pub interpreter: String,
    pub abi: String,
    pub platform: String,
}

impl Tag {
    pub fn new(
        interpreter: impl Into<String>,
        abi: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            abi: abi.into(),
            platform: platform.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.interpreter, self.abi, self.platform)
    }
}

/// A caller-supplied description of the running interpreter, used as the
/// fallback for any [`TargetPython`] field left unspecified.
///
/// This crate never inspects its own execution environment; whoever owns the
/// process boundary fills this in once and passes it down.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Interpreter version, e.g. `(3, 9)`.
    pub py_version: (u8, u8),
    /// Implementation tag code, e.g. `cp` or `pp`.
    pub implementation: String,
    /// Supported ABIs, most preferred first, e.g. `["cp39"]`.
    pub abis: Vec<String>,
    /// Supported platforms, most preferred first, before alias expansion.
    pub platforms: Vec<String>,
}

/// A description of the interpreter a resolution run targets, expanded into
/// the ordered sequence of wheel tags that interpreter can consume.
///
/// The sequence is computed once at construction. It is a pure function of
/// the four inputs, so instances are freely shareable and the sequence is
/// stable across queries.
#[derive(Debug, Clone)]
pub struct TargetPython {
    py_version: (u8, u8),
    implementation: String,
    abis: Vec<String>,
    platforms: Vec<String>,
    supported_tags: Vec<Tag>,
}

impl TargetPython {
    /// Create a target from the given fields, falling back to the supplied
    /// [`Environment`] for any left as `None`.
    pub fn new(
        py_version: Option<(u8, u8)>,
        abis: Option<Vec<String>>,
        implementation: Option<String>,
        platforms: Option<Vec<String>>,
        env: &Environment,
    ) -> Self {
        let py_version = py_version.unwrap_or(env.py_version);
        let implementation = implementation.unwrap_or_else(|| env.implementation.clone());
        let abis = abis.unwrap_or_else(|| env.abis.clone());
        let platforms = expand_platforms(platforms.unwrap_or_else(|| env.platforms.clone()));
        let supported_tags = supported_tags(py_version, &implementation, &abis, &platforms);
        Self {
            py_version,
            implementation,
            abis,
            platforms,
            supported_tags,
        }
    }

    pub fn py_version(&self) -> (u8, u8) {
        self.py_version
    }

    pub fn implementation(&self) -> &str {
        &self.implementation
    }

    pub fn abis(&self) -> &[String] {
        &self.abis
    }

    /// The platforms the target accepts, after alias expansion, most
    /// preferred first.
    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    /// The compatible tags for the target, most specific first, without
    /// duplicates.
    pub fn supported_tags(&self) -> &[Tag] {
        &self.supported_tags
    }
}

/// Enumerate the compatible tags for an interpreter, most specific first.
///
/// Tags are prioritized by their position in the returned vector, and the
/// platform and ABI lists define priority within each block. The enumeration
/// mirrors the ecosystem-standard ordering; deviating from it silently breaks
/// wheel selection downstream.
fn supported_tags(
    py_version: (u8, u8),
    implementation: &str,
    abis: &[String],
    platforms: &[String],
) -> Vec<Tag> {
    let (major, minor) = py_version;
    let interpreter = format!("{implementation}{major}{minor}");
    let is_cpython = implementation == "cp";

    let mut tags = Vec::with_capacity(5 * platforms.len());

    if !abis.is_empty() {
        // 1. The exact interpreter and ABI.
        for abi in abis {
            for platform in platforms {
                tags.push(Tag::new(&interpreter, abi, platform));
            }
        }
        if is_cpython {
            // 2. The stable ABI, then no ABI (e.g. an executable binary). For
            //    some reason 3.2 is the minimum python for the cp abi.
            if py_version >= (3, 2) {
                for platform in platforms {
                    tags.push(Tag::new(&interpreter, "abi3", platform));
                }
            }
            for platform in platforms {
                tags.push(Tag::new(&interpreter, "none", platform));
            }
            // 3. The stable ABI of every older minor, descending, to capture
            //    forward-compatible wheels built against an older CPython.
            if py_version >= (3, 2) {
                for minor in (2..minor).rev() {
                    for platform in platforms {
                        tags.push(Tag::new(
                            format!("{implementation}{major}{minor}"),
                            "abi3",
                            platform,
                        ));
                    }
                }
            }
        } else if !abis.iter().any(|abi| abi == "none") {
            // 2. No ABI for the exact interpreter.
            for platform in platforms {
                tags.push(Tag::new(&interpreter, "none", platform));
            }
        }
    }

    // 4. Interpreter-generic tags for the current minor, the bare major, and
    //    every older minor, descending.
    for minor in (0..=minor).rev() {
        for platform in platforms {
            tags.push(Tag::new(format!("py{major}{minor}"), "none", platform));
        }
        // After the matching version, emit tags for the major version alone,
        // i.e. `py3`.
        if minor == py_version.1 {
            for platform in platforms {
                tags.push(Tag::new(format!("py{major}"), "none", platform));
            }
        }
    }

    // 5. Platform-independent fallbacks (pure-Python wheels).
    if !abis.is_empty() {
        tags.push(Tag::new(&interpreter, "none", "any"));
    }
    for minor in (0..=minor).rev() {
        tags.push(Tag::new(format!("py{major}{minor}"), "none", "any"));
        if minor == py_version.1 {
            tags.push(Tag::new(format!("py{major}"), "none", "any"));
        }
    }

    // A tag appears at most once; the first (most specific) occurrence wins.
    let mut seen = FxHashSet::default();
    tags.retain(|tag| seen.insert(tag.clone()));
    tags
}
