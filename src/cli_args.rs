use std::path::PathBuf;

/// Command-line arguments without the program name.
pub fn collect() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Value of `--name=value` or `--name value`; first occurrence wins.
pub fn str_arg(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            return Some(raw.to_string());
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
        {
            return Some(next.clone());
        }
    }
    None
}

pub fn u32_arg(args: &[String], name: &str) -> Option<u32> {
    str_arg(args, name).and_then(|raw| raw.trim().parse::<u32>().ok())
}

pub fn path_arg(args: &[String], name: &str) -> Option<PathBuf> {
    str_arg(args, name)
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
}

pub fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|arg| arg == name)
}

/// First argument when it is not a flag.
pub fn leading_positional(args: &[String]) -> Option<&str> {
    args.first()
        .map(String::as_str)
        .filter(|arg| !arg.starts_with("--"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reads_both_value_forms() {
        let a = args(&["table", "--season", "2024", "--db=/tmp/x.sqlite"]);
        assert_eq!(u32_arg(&a, "--season"), Some(2024));
        assert_eq!(path_arg(&a, "--db"), Some(PathBuf::from("/tmp/x.sqlite")));
        assert_eq!(str_arg(&a, "--team"), None);
    }

    #[test]
    fn blank_paths_and_bad_numbers_are_absent() {
        let a = args(&["--db=  ", "--season", "abc"]);
        assert_eq!(path_arg(&a, "--db"), None);
        assert_eq!(u32_arg(&a, "--season"), None);
    }

    #[test]
    fn flags_and_positionals() {
        let a = args(&["matches.json", "--json"]);
        assert!(has_flag(&a, "--json"));
        assert!(!has_flag(&a, "--coach"));
        assert_eq!(leading_positional(&a), Some("matches.json"));
        assert_eq!(leading_positional(&args(&["--db", "x"])), None);
    }
}
