use super::model::Direction;

/// Prefix of every rule name and the pattern the list command searches for
pub const DEFAULT_PREFIX: &str = "Internet Restricted";

/// File name of `path` without its last extension.
///
/// Both `\` and `/` count as separators so Windows paths split the same way on
/// every host.
pub fn app_name(path: &str) -> &str {
    let file = path.rsplit(['\\', '/']).next().unwrap_or(path);
    match file.rfind('.') {
        Some(dot) => &file[..dot],
        None => file,
    }
}

/// `"<prefix>: <app> Inbound|Outbound"`
pub fn rule_name(prefix: &str, app: &str, direction: Direction) -> String {
    format!("{prefix}: {app} {}", direction.label())
}

pub fn rule_description(app: &str, direction: Direction) -> String {
    format!(
        "Block {} traffic for {app}",
        direction.label().to_lowercase()
    )
}

/// Case-insensitive, exact comparison of two application paths.
///
/// No normalization happens: separators, relative segments and symlinks are
/// compared as written.
pub fn same_path(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
