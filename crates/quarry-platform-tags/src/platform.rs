use rustc_hash::FxHashSet;
use tracing::trace;

/// Expand pip-style platform aliases into the concrete platform tags they
/// cover, preserving the caller's priority order and dropping duplicates.
///
/// `macosx_{major}_{minor}_{arch}` fans out into every compatible macOS
/// version and binary format, and the legacy `manylinux2014`/`manylinux2010`
/// aliases pull in their older spellings. Anything unrecognized passes
/// through untouched.
pub fn expand_platforms(platforms: Vec<String>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut expanded = Vec::with_capacity(platforms.len());
    for platform in platforms {
        for candidate in expand_platform(&platform) {
            if seen.insert(candidate.clone()) {
                expanded.push(candidate);
            }
        }
    }
    expanded
}

fn expand_platform(platform: &str) -> Vec<String> {
    if let Some(rest) = platform.strip_prefix("macosx_") {
        mac_platforms(platform, rest)
    } else if let Some(arch) = platform.strip_prefix("manylinux2014_") {
        // Wheels built for the older manylinux standards remain installable.
        // <https://peps.python.org/pep-0599/#backwards-compatibility-with-manylinux2010-wheels>
        let mut tags = vec![platform.to_string()];
        if arch == "i686" || arch == "x86_64" {
            tags.push(format!("manylinux2010_{arch}"));
            tags.push(format!("manylinux1_{arch}"));
        }
        tags
    } else if let Some(arch) = platform.strip_prefix("manylinux2010_") {
        vec![platform.to_string(), format!("manylinux1_{arch}")]
    } else {
        vec![platform.to_string()]
    }
}

/// Expand a `macosx_{major}_{minor}_{arch}` tag into the tags of every older
/// macOS version and binary format able to satisfy it, descending.
///
/// Source: <https://github.com/pypa/packaging/blob/fd4f11139d1c884a637be8aa26bb60a31fbc9411/packaging/tags.py#L346>
fn mac_platforms(platform: &str, rest: &str) -> Vec<String> {
    let mut parts = rest.splitn(3, '_');
    let (Some(major), Some(minor), Some(arch)) = (
        parts.next().and_then(|s| s.parse::<u16>().ok()),
        parts.next().and_then(|s| s.parse::<u16>().ok()),
        parts.next(),
    ) else {
        trace!("Passing through unversioned macOS platform tag: {platform}");
        return vec![platform.to_string()];
    };

    let mut tags = Vec::new();
    match major {
        10 => {
            // Prior to Mac OS 11, each yearly release of Mac OS bumped the
            // "minor" version number. The major version was always 10.
            for minor in (0..=minor).rev() {
                for binary_format in mac_binary_formats((10, minor), arch) {
                    tags.push(format!("macosx_10_{minor}_{binary_format}"));
                }
            }
        }
        value if value >= 11 => {
            // Starting with Mac OS 11, each yearly release bumps the major
            // version number. The minor versions are now the midyear updates.
            for major in (11..=major).rev() {
                for binary_format in mac_binary_formats((major, 0), arch) {
                    tags.push(format!("macosx_{major}_0_{binary_format}"));
                }
            }
            // The "universal2" binary format can have a macOS version earlier
            // than 11.0 when the x86_64 part of the binary supports that
            // version of macOS.
            if arch == "x86_64" {
                for minor in (4..=16).rev() {
                    for binary_format in mac_binary_formats((10, minor), arch) {
                        tags.push(format!("macosx_10_{minor}_{binary_format}"));
                    }
                }
            } else {
                for minor in (4..=16).rev() {
                    tags.push(format!("macosx_10_{minor}_universal2"));
                }
            }
        }
        _ => {
            trace!("Passing through unsupported macOS version in platform tag: {platform}");
            return vec![platform.to_string()];
        }
    }
    tags
}

/// Determine the appropriate binary formats for a macOS version.
/// Source: <https://github.com/pypa/packaging/blob/fd4f11139d1c884a637be8aa26bb60a31fbc9411/packaging/tags.py#L314>
fn mac_binary_formats(version: (u16, u16), arch: &str) -> Vec<String> {
    let mut formats = vec![arch.to_string()];

    match arch {
        "x86_64" => {
            if version < (10, 4) {
                return Vec::new();
            }
            formats.extend(["intel".to_string(), "fat64".to_string(), "fat32".to_string()]);
        }
        "i386" => {
            if version < (10, 4) {
                return Vec::new();
            }
            formats.extend(["intel".to_string(), "fat32".to_string(), "fat".to_string()]);
        }
        _ => {}
    }

    if matches!(arch, "arm64" | "x86_64") {
        formats.push("universal2".to_string());
    }
    if matches!(arch, "x86_64" | "i386" | "intel") {
        formats.push("universal".to_string());
    }

    formats
}
