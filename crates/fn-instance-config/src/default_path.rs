//! Default config file location under the user's home directory.

#[cfg(not(unix))]
use directories::BaseDirs;
use log::debug;
use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Config file location relative to the home directory.
pub const DEFAULT_CONFIG_RELATIVE_PATH: &str =
    "github.com/apache/pulsar/pulsar-function-go/conf/conf.yaml";

static DEFAULT_CONFIG_PATH: LazyLock<String> = LazyLock::new(|| {
    let home = home_dir_from(user_home_dir(), env::var("HOME").ok());
    let path = default_config_path_for(&home);
    debug!("default instance config path: {path}");
    path
});

/// Default value of `-instance-conf-path`, computed once per process.
pub fn default_config_path() -> &'static str {
    DEFAULT_CONFIG_PATH.as_str()
}

/// Join a home directory and [`DEFAULT_CONFIG_RELATIVE_PATH`] with a single `/`.
///
/// No normalization is applied: an empty home yields `/<relative path>`.
pub fn default_config_path_for(home: &str) -> String {
    format!("{home}/{DEFAULT_CONFIG_RELATIVE_PATH}")
}

/// Pick the home directory: the OS user lookup first, then `$HOME`, then empty.
pub(crate) fn home_dir_from(user_home: Option<PathBuf>, env_home: Option<String>) -> String {
    user_home
        .map(|home| home.to_string_lossy().into_owned())
        .filter(|home| !home.is_empty())
        .or(env_home)
        .unwrap_or_default()
}

/// Home directory from the password database entry of the real user.
#[cfg(unix)]
fn user_home_dir() -> Option<PathBuf> {
    use std::ffi::{CStr, OsStr};
    use std::os::unix::ffi::OsStrExt;

    const MAX_BUF_LEN: usize = 1 << 20;

    let uid = unsafe { libc::getuid() };
    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        let mut entry: libc::passwd = unsafe { std::mem::zeroed() };
        let mut found: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut entry, buf.as_mut_ptr(), buf.len(), &mut found)
        };
        if rc == libc::ERANGE && buf.len() < MAX_BUF_LEN {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || found.is_null() || entry.pw_dir.is_null() {
            debug!("no password entry for uid {uid} (rc {rc})");
            return None;
        }
        // `pw_dir` points into `buf`, which outlives this borrow.
        let dir = unsafe { CStr::from_ptr(entry.pw_dir) };
        return Some(PathBuf::from(OsStr::from_bytes(dir.to_bytes())));
    }
}

#[cfg(not(unix))]
fn user_home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn joins_home_with_single_slash() {
        assert_eq!(
            default_config_path_for("/home/alice"),
            "/home/alice/github.com/apache/pulsar/pulsar-function-go/conf/conf.yaml"
        );
    }

    #[test]
    fn trailing_slash_is_not_normalized() {
        assert_eq!(
            default_config_path_for("/home/alice/"),
            format!("/home/alice//{DEFAULT_CONFIG_RELATIVE_PATH}")
        );
    }

    #[test]
    fn missing_home_degrades_to_root_relative() {
        let home = home_dir_from(None, None);
        assert_eq!(home, "");
        assert_eq!(
            default_config_path_for(&home),
            format!("/{DEFAULT_CONFIG_RELATIVE_PATH}")
        );
    }

    #[test]
    fn user_lookup_wins_over_env() {
        let home = home_dir_from(
            Some(PathBuf::from("/home/alice")),
            Some("/tmp/other".to_string()),
        );
        assert_eq!(home, "/home/alice");
    }

    #[test]
    fn empty_user_lookup_falls_back_to_env() {
        assert_eq!(
            home_dir_from(Some(PathBuf::new()), Some("/home/bob".to_string())),
            "/home/bob"
        );
        assert_eq!(
            home_dir_from(None, Some("/home/bob".to_string())),
            "/home/bob"
        );
    }

    #[test]
    fn process_default_ends_with_relative_path() {
        let path = default_config_path();
        assert!(path.ends_with(&format!("/{DEFAULT_CONFIG_RELATIVE_PATH}")));
    }

    /// Home directory listed for `uid` in `/etc/passwd`, if it has an entry.
    #[cfg(unix)]
    fn passwd_file_home(uid: libc::uid_t) -> Option<String> {
        let passwd = std::fs::read_to_string("/etc/passwd").ok()?;
        passwd.lines().find_map(|line| {
            let fields: Vec<&str> = line.split(':').collect();
            (fields.len() >= 6 && fields[2].parse::<libc::uid_t>().ok() == Some(uid)).then(|| fields[5].to_string())
        })
    }

    #[cfg(unix)]
    #[test]
    fn user_lookup_reads_password_entry() {
        let uid = unsafe { libc::getuid() };
        let Some(expected) = passwd_file_home(uid) else {
            return;
        };
        assert_eq!(
            user_home_dir().map(|home| home.to_string_lossy().into_owned()),
            Some(expected)
        );
    }
}
