//! Finding and launching the target application
//!
//! Applications are described by freedesktop `.desktop` files. The locator
//! walks an ordered list of candidate desktop file ids and returns the first
//! one installed in any of the application directories.

use crate::core::{AppIcon, Error, Result};
use crate::runtime::process::spawn_detached;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tracing::{debug, info};

/// An installed application the provider can launch
pub trait AppDescriptor: Send + Sync + Debug {
    /// Desktop file id, e.g. `jetbrains-rider.desktop`
    fn id(&self) -> &str;

    /// Human readable application name
    fn name(&self) -> &str;

    /// Icon of the application, if it declares one
    fn icon(&self) -> Option<AppIcon>;

    /// Start the application, optionally opening the given files
    fn launch(&self, files: &[PathBuf]) -> Result<()>;
}

/// Lookup of installed applications by desktop file id
pub trait AppLocator: Send + Sync {
    /// The first candidate that resolves to an installed application
    fn find_app(&self, candidates: &[String]) -> Option<Arc<dyn AppDescriptor>>;
}

/// Application described by a parsed `.desktop` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    id: String,
    path: PathBuf,
    name: String,
    exec: String,
    icon: Option<String>,
    hidden: bool,
}

impl DesktopEntry {
    /// Parse the `[Desktop Entry]` group of a desktop file
    pub fn parse(id: &str, path: &Path, content: &str) -> Result<Self> {
        let mut in_main_group = false;
        let mut name = None;
        let mut exec = None;
        let mut icon = None;
        let mut hidden = false;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') {
                in_main_group = line == "[Desktop Entry]";
                continue;
            }
            if !in_main_group {
                continue;
            }
            // Localized keys such as Name[de] are ignored
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().to_string();
                match key.trim() {
                    "Name" => name = Some(value),
                    "Exec" => exec = Some(value),
                    "Icon" if !value.is_empty() => icon = Some(value),
                    "Hidden" => hidden = value == "true",
                    _ => {}
                }
            }
        }

        let exec = exec.ok_or_else(|| Error::invalid_desktop_entry(path, "missing Exec key"))?;
        Ok(Self {
            id: id.to_string(),
            path: path.to_path_buf(),
            name: name.unwrap_or_else(|| id.trim_end_matches(".desktop").to_string()),
            exec,
            icon,
            hidden,
        })
    }

    /// Read and parse a desktop file
    pub fn load(id: &str, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(id, path, &content)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exec(&self) -> &str {
        &self.exec
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Expand the Exec line into a command line for the given files
    pub fn command_line(&self, files: &[PathBuf]) -> Result<Vec<String>> {
        let tokens = split_exec(&self.exec)
            .ok_or_else(|| Error::invalid_desktop_entry(&self.path, "unbalanced quotes in Exec"))?;

        let mut argv = Vec::new();
        let mut used_files = false;
        for token in tokens {
            match token.as_str() {
                "%f" | "%u" => {
                    used_files = true;
                    argv.extend(files.first().map(|f| f.display().to_string()));
                }
                "%F" | "%U" => {
                    used_files = true;
                    argv.extend(files.iter().map(|f| f.display().to_string()));
                }
                "%i" => {
                    if let Some(icon) = &self.icon {
                        argv.push("--icon".to_string());
                        argv.push(icon.clone());
                    }
                }
                "%c" => argv.push(self.name.clone()),
                "%k" => argv.push(self.path.display().to_string()),
                _ => {
                    let expanded = expand_inline_codes(&token);
                    if !expanded.is_empty() {
                        argv.push(expanded);
                    }
                }
            }
        }
        if !used_files {
            argv.extend(files.iter().map(|f| f.display().to_string()));
        }

        if argv.is_empty() {
            return Err(Error::invalid_desktop_entry(&self.path, "empty Exec"));
        }
        Ok(argv)
    }

    /// Start the application detached and return its process id
    pub fn spawn(&self, files: &[PathBuf]) -> Result<u32> {
        let argv = self.command_line(files)?;
        let program = which::which(&argv[0])
            .map_err(|e| Error::launch(&self.name, format!("{}: {}", argv[0], e)))?;

        info!("Launching {} with {:?}", self.name, &argv[1..]);
        spawn_detached(Command::new(program).args(&argv[1..]))
            .map_err(|e| Error::launch(&self.name, e.to_string()))
    }
}

impl AppDescriptor for DesktopEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn icon(&self) -> Option<AppIcon> {
        self.icon.as_ref().map(AppIcon::new)
    }

    fn launch(&self, files: &[PathBuf]) -> Result<()> {
        self.spawn(files).map(|_| ())
    }
}

/// Split an Exec value into arguments, honouring double quotes and escapes
fn split_exec(exec: &str) -> Option<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    let mut chars = exec.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            '\\' if quoted => current.push(chars.next()?),
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return None;
    }
    if in_token {
        args.push(current);
    }
    Some(args)
}

/// Replace `%%` and drop deprecated or unknown field codes inside a token
fn expand_inline_codes(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            if let Some('%') = chars.next() {
                out.push('%');
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Locator over XDG application directories
#[derive(Debug, Clone)]
pub struct DesktopAppLocator {
    data_dirs: Vec<PathBuf>,
}

impl DesktopAppLocator {
    /// Search `applications/` below each of the given data directories, in order
    pub fn new(data_dirs: Vec<PathBuf>) -> Self {
        Self { data_dirs }
    }

    /// Extra directories first, then `$XDG_DATA_HOME` and `$XDG_DATA_DIRS`
    pub fn with_xdg_dirs(extra: &[PathBuf]) -> Self {
        let mut data_dirs = extra.to_vec();
        data_dirs.extend(dirs::data_dir());
        let system_dirs = std::env::var("XDG_DATA_DIRS")
            .ok()
            .filter(|dirs| !dirs.is_empty())
            .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
        data_dirs.extend(system_dirs.split(':').filter(|d| !d.is_empty()).map(PathBuf::from));
        Self::new(data_dirs)
    }

    pub fn data_dirs(&self) -> &[PathBuf] {
        &self.data_dirs
    }

    fn resolve(&self, id: &str) -> Option<DesktopEntry> {
        self.data_dirs
            .iter()
            .map(|dir| dir.join("applications").join(id))
            .filter(|path| path.is_file())
            .find_map(|path| match DesktopEntry::load(id, &path) {
                Ok(entry) if entry.is_hidden() => {
                    debug!("Skipping hidden desktop file {}", path.display());
                    None
                }
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable desktop file {}: {}", path.display(), e);
                    None
                }
            })
    }
}

impl AppLocator for DesktopAppLocator {
    fn find_app(&self, candidates: &[String]) -> Option<Arc<dyn AppDescriptor>> {
        candidates.iter().find_map(|id| {
            self.resolve(id).map(|entry| {
                debug!("Found {} at {}", id, entry.path().display());
                Arc::new(entry) as Arc<dyn AppDescriptor>
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const RIDER_DESKTOP: &str = "[Desktop Entry]
Version=1.0
Type=Application
Name=Rider
Name[de]=Rider DE
Icon=/opt/rider/bin/rider.svg
Exec=\"/opt/rider/bin/rider.sh\" %f
Categories=Development;IDE;

[Desktop Action new-window]
Name=New Window
Exec=/opt/rider/bin/rider.sh --new
";

    fn write_desktop(dir: &Path, id: &str, content: &str) {
        let apps = dir.join("applications");
        std::fs::create_dir_all(&apps).unwrap();
        std::fs::write(apps.join(id), content).unwrap();
    }

    fn entry(exec: &str) -> DesktopEntry {
        DesktopEntry::parse(
            "rider.desktop",
            Path::new("/usr/share/applications/rider.desktop"),
            &format!("[Desktop Entry]\nName=Rider\nIcon=rider\nExec={}\n", exec),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_desktop_entry() {
        let entry = DesktopEntry::parse(
            "jetbrains-rider.desktop",
            Path::new("/x/jetbrains-rider.desktop"),
            RIDER_DESKTOP,
        )
        .unwrap();

        assert_eq!(entry.id(), "jetbrains-rider.desktop");
        assert_eq!(entry.name(), "Rider");
        assert_eq!(entry.exec(), "\"/opt/rider/bin/rider.sh\" %f");
        assert_eq!(entry.icon(), Some(AppIcon::new("/opt/rider/bin/rider.svg")));
        assert!(!entry.is_hidden());
    }

    #[test]
    fn test_parse_requires_exec() {
        let result = DesktopEntry::parse(
            "broken.desktop",
            Path::new("/x/broken.desktop"),
            "[Desktop Entry]\nName=Broken\n[Other]\nExec=nope\n",
        );
        assert!(matches!(result, Err(Error::InvalidDesktopEntry { .. })));
    }

    #[test]
    fn test_parse_defaults_name_to_id() {
        let entry =
            DesktopEntry::parse("rider.desktop", Path::new("/x"), "[Desktop Entry]\nExec=rider\n")
                .unwrap();
        assert_eq!(entry.name(), "rider");
        assert!(entry.icon().is_none());
    }

    #[test]
    fn test_command_line_single_file() {
        let argv = entry("\"/opt/rider/bin/rider.sh\" %f")
            .command_line(&[PathBuf::from("/home/user/Shop.sln")])
            .unwrap();
        assert_eq!(argv, vec!["/opt/rider/bin/rider.sh", "/home/user/Shop.sln"]);
    }

    #[test]
    fn test_command_line_without_files_drops_codes() {
        let argv = entry("/snap/bin/rider %U").command_line(&[]).unwrap();
        assert_eq!(argv, vec!["/snap/bin/rider"]);
    }

    #[test]
    fn test_command_line_other_field_codes() {
        let argv = entry("rider %i --title %c %k --percent=100%% %d")
            .command_line(&[])
            .unwrap();
        assert_eq!(
            argv,
            vec![
                "rider",
                "--icon",
                "rider",
                "--title",
                "Rider",
                "/usr/share/applications/rider.desktop",
                "--percent=100%",
            ]
        );
    }

    #[test]
    fn test_command_line_appends_files_without_code() {
        let argv = entry("rider")
            .command_line(&[PathBuf::from("/a.sln")])
            .unwrap();
        assert_eq!(argv, vec!["rider", "/a.sln"]);
    }

    #[test]
    fn test_command_line_quoted_arguments() {
        let argv = entry(r#""/opt/Jet Brains/rider.sh" "--flag=\"x\"" %F"#)
            .command_line(&[PathBuf::from("/a.sln"), PathBuf::from("/b.sln")])
            .unwrap();
        assert_eq!(
            argv,
            vec!["/opt/Jet Brains/rider.sh", "--flag=\"x\"", "/a.sln", "/b.sln"]
        );
    }

    #[test]
    fn test_command_line_rejects_unbalanced_quotes() {
        let result = entry("\"/opt/rider.sh %f").command_line(&[]);
        assert!(matches!(result, Err(Error::InvalidDesktopEntry { .. })));
    }

    #[test]
    fn test_launch_missing_program_fails() {
        let result = entry("/nonexistent/bin/rider-for-tests %f").launch(&[]);
        assert!(matches!(result, Err(Error::Launch { .. })));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_launched_processes_are_reaped() {
        let app = entry("true %f");
        let first = app.spawn(&[]).unwrap();
        let second = app.spawn(&[PathBuf::from("/home/user/Shop.sln")]).unwrap();
        app.launch(&[]).unwrap();

        assert!(crate::testing::wait_for_reap(first));
        assert!(crate::testing::wait_for_reap(second));
    }

    #[test]
    fn test_locator_returns_first_installed_candidate() {
        let temp_dir = TempDir::new().unwrap();
        write_desktop(temp_dir.path(), "y.desktop", "[Desktop Entry]\nName=Y\nExec=y\n");

        let locator = DesktopAppLocator::new(vec![temp_dir.path().to_path_buf()]);
        let app = locator
            .find_app(&["x.desktop".to_string(), "y.desktop".to_string()])
            .unwrap();
        assert_eq!(app.id(), "y.desktop");
        assert_eq!(app.name(), "Y");
    }

    #[test]
    fn test_locator_prefers_candidate_order_over_dir_order() {
        let user_dir = TempDir::new().unwrap();
        let system_dir = TempDir::new().unwrap();
        write_desktop(user_dir.path(), "y.desktop", "[Desktop Entry]\nExec=y\n");
        write_desktop(system_dir.path(), "x.desktop", "[Desktop Entry]\nExec=x\n");

        let locator = DesktopAppLocator::new(vec![
            user_dir.path().to_path_buf(),
            system_dir.path().to_path_buf(),
        ]);
        let app = locator
            .find_app(&["x.desktop".to_string(), "y.desktop".to_string()])
            .unwrap();
        assert_eq!(app.id(), "x.desktop");
    }

    #[test]
    fn test_locator_skips_hidden_and_broken_entries() {
        let user_dir = TempDir::new().unwrap();
        let system_dir = TempDir::new().unwrap();
        write_desktop(
            user_dir.path(),
            "rider.desktop",
            "[Desktop Entry]\nExec=rider\nHidden=true\n",
        );
        write_desktop(system_dir.path(), "rider.desktop", "[Desktop Entry]\nName=System\nExec=rider\n");
        write_desktop(system_dir.path(), "broken.desktop", "[Desktop Entry]\nName=Broken\n");

        let locator = DesktopAppLocator::new(vec![
            user_dir.path().to_path_buf(),
            system_dir.path().to_path_buf(),
        ]);
        let app = locator.find_app(&["rider.desktop".to_string()]).unwrap();
        assert_eq!(app.name(), "System");
        assert!(locator.find_app(&["broken.desktop".to_string()]).is_none());
    }

    #[test]
    fn test_locator_finds_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let locator = DesktopAppLocator::new(vec![temp_dir.path().to_path_buf()]);
        assert!(locator.find_app(&["x.desktop".to_string()]).is_none());
        assert!(locator.find_app(&[]).is_none());
    }

    #[test]
    fn test_xdg_locator_puts_extra_dirs_first() {
        let extra = PathBuf::from("/opt/extra-share");
        let locator = DesktopAppLocator::with_xdg_dirs(&[extra.clone()]);
        assert_eq!(locator.data_dirs().first(), Some(&extra));
        assert!(locator.data_dirs().len() > 1);
    }
}
