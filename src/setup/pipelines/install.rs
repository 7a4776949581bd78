//! Install and verification flows on top of `FijiSetup`

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::automator::probe_fiji;
use crate::error::{AutomatorError, Result};
use crate::launch::is_process_running;
use crate::setup::operations::{
    confirm, download_file, extract_zip, fetch_release, http_client, installed_plugin_jars,
    make_executable, read_installed_version, remove_plugin_jars, write_installed_version,
};
use crate::setup::pure::{is_up_to_date, pick_thunderstorm_asset};
use crate::setup::types::{FijiSetup, ReinstallPolicy, ReleaseInfo, SetupReport};
use crate::util;

const API_TIMEOUT: Duration = Duration::from_secs(30);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(1800);

impl ReinstallPolicy {
    /// Whether an existing install should be replaced
    fn replace(self, question: &str) -> bool {
        match self {
            ReinstallPolicy::Keep => false,
            ReinstallPolicy::Replace => true,
            ReinstallPolicy::Ask => confirm(question),
        }
    }
}

impl FijiSetup {
    /// Whether files can be written to the install directory
    ///
    /// A directory that does not exist yet is judged by its nearest existing ancestor.
    pub fn check_permissions(&self) -> bool {
        let existing = self.install_dir.ancestors().find(|p| p.is_dir());
        existing.is_some_and(util::check_permissions)
    }

    /// Download and unpack Fiji into `install_dir`
    pub fn download_fiji(&self, policy: ReinstallPolicy) -> Result<PathBuf> {
        let client = http_client(DOWNLOAD_TIMEOUT)?;
        self.install_fiji_with(&client, policy)
    }

    pub(crate) fn install_fiji_with(&self, client: &Client, policy: ReinstallPolicy) -> Result<PathBuf> {
        log::info!("setup - Setting up Fiji for {}", self.os.key());

        if self.fiji_dir.exists() {
            let question = format!("Fiji already exists at {}. Reinstall?", self.fiji_dir.display());
            if !policy.replace(&question) {
                log::info!("setup - Keeping existing Fiji at {}", self.fiji_dir.display());
                return Ok(self.fiji_dir.clone());
            }
            if let Some(name) = self.running_launcher() {
                log::warn!("setup - {} appears to be running; close Fiji before reinstalling", name);
            }
            log::info!("setup - Removing existing Fiji installation");
            fs::remove_dir_all(&self.fiji_dir)?;
        }

        let url = self.config.fiji_url(self.os);
        let tmp = tempfile::tempdir()?;
        let archive = tmp.path().join(format!("fiji-{}.zip", self.os.archive_tag()));

        download_file(client, url, &archive, "Fiji")?;
        self.unpack_fiji(&archive)?;

        log::info!("setup - Fiji installed at {}", self.fiji_dir.display());
        Ok(self.fiji_dir.clone())
    }

    /// Launcher file name, if a process by that name is running
    fn running_launcher(&self) -> Option<String> {
        let launcher = self.fiji_executable();
        let name = launcher.file_name()?.to_string_lossy().into_owned();
        is_process_running(&name).then_some(name)
    }

    /// Extract a Fiji archive and make the launcher runnable
    pub(crate) fn unpack_fiji(&self, archive: &Path) -> Result<()> {
        util::ensure_directory(&self.install_dir)?;
        extract_zip(archive, &self.install_dir)?;

        if !self.fiji_dir.is_dir() {
            return Err(AutomatorError::Archive {
                path: archive.to_path_buf(),
                reason: format!("no {} directory after extraction", self.fiji_dir.display()),
            });
        }

        if self.os.is_unix() {
            let exe = self.fiji_executable();
            match make_executable(&exe) {
                Ok(()) => log::debug!("setup - Made {} executable", exe.display()),
                Err(e) => log::warn!("setup - Could not make {} executable: {}", exe.display(), e),
            }
        }
        Ok(())
    }

    /// Look up the plugin jar of the latest ThunderSTORM release
    pub fn latest_thunderstorm_release(&self) -> Result<ReleaseInfo> {
        let client = http_client(API_TIMEOUT)?;
        let release = fetch_release(&client, self.config.thunderstorm_api_url())?;

        let asset = pick_thunderstorm_asset(&release.assets).ok_or_else(|| {
            AutomatorError::Release(format!(
                "no ThunderSTORM .jar in release {}",
                release.tag_name
            ))
        })?;

        Ok(ReleaseInfo {
            tag: release.tag_name.clone(),
            download_url: asset.browser_download_url.clone(),
            file_name: asset.name.clone(),
        })
    }

    /// Download the plugin jar into `plugins/`, returning its path
    pub fn install_thunderstorm(&self, policy: ReinstallPolicy) -> Result<PathBuf> {
        log::info!("setup - Installing ThunderSTORM plugin");

        let release = self.latest_thunderstorm_release()?;
        let client = http_client(DOWNLOAD_TIMEOUT)?;
        self.install_plugin_release(&client, &release, policy)
    }

    pub(crate) fn install_plugin_release(
        &self,
        client: &Client,
        release: &ReleaseInfo,
        policy: ReinstallPolicy,
    ) -> Result<PathBuf> {
        util::ensure_directory(&self.plugins_dir)?;
        let existing = installed_plugin_jars(&self.plugins_dir);

        if let Some(current) = existing.first() {
            let installed = read_installed_version(&self.version_file());
            let up_to_date = installed
                .as_deref()
                .is_some_and(|tag| is_up_to_date(tag, &release.tag));

            let replace = match policy {
                // Only upgrade when the recorded version is known to be older
                ReinstallPolicy::Keep => installed.is_some() && !up_to_date,
                other => other.replace(&format!(
                    "ThunderSTORM plugin already exists: {}. Reinstall?",
                    current.display()
                )),
            };

            if !replace {
                log::info!(
                    "setup - Keeping {} ({})",
                    current.display(),
                    installed.as_deref().unwrap_or("version unknown")
                );
                return Ok(current.clone());
            }
        }

        // Old jars stay until the new one is in place
        let jar = self.plugins_dir.join(&release.file_name);
        download_file(client, &release.download_url, &jar, "ThunderSTORM plugin")?;
        let stale: Vec<PathBuf> = existing.into_iter().filter(|p| *p != jar).collect();
        remove_plugin_jars(&stale)?;
        write_installed_version(&self.version_file(), &release.tag)?;

        log::info!("setup - ThunderSTORM {} installed at {}", release.tag, jar.display());
        Ok(jar)
    }

    /// Check the layout on disk, then run the probe macro
    pub fn verify_installation(&self) -> Result<SetupReport> {
        log::info!("setup - Verifying installation");

        let fiji_executable = self.fiji_executable();
        if !self.fiji_dir.is_dir() || !fiji_executable.is_file() {
            return Err(AutomatorError::ExecutableNotFound {
                searched: vec![fiji_executable],
            });
        }
        log::info!("setup - Fiji executable found at {}", fiji_executable.display());

        let plugin_jar = installed_plugin_jars(&self.plugins_dir)
            .into_iter()
            .next()
            .ok_or_else(|| AutomatorError::PluginMissing(self.plugins_dir.clone()))?;
        log::info!("setup - ThunderSTORM plugin found: {}", plugin_jar.display());

        let fiji_version = probe_fiji(&fiji_executable, self.config.probe_timeout())?;

        Ok(SetupReport {
            fiji_executable,
            plugin_jar,
            fiji_version,
        })
    }

    /// Permissions, install dir, Fiji, plugin, verification
    pub fn setup_all(&self, policy: ReinstallPolicy) -> Result<SetupReport> {
        log::info!("setup - Platform: {}", self.os.key());
        log::info!("setup - Installation directory: {}", self.install_dir.display());

        if !self.check_permissions() {
            return Err(AutomatorError::InvalidInput {
                path: self.install_dir.clone(),
                reason: "no write permission; run with elevated rights or pick another --install-dir"
                    .to_string(),
            });
        }

        util::ensure_directory(&self.install_dir)?;
        self.download_fiji(policy)?;
        self.install_thunderstorm(policy)?;
        let report = self.verify_installation()?;

        log::info!("setup - Setup completed successfully");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AutomatorConfig;
    use crate::platform::Os;
    use crate::setup::operations::download::test_server;
    use std::io::Write;

    fn setup_in(dir: &Path) -> FijiSetup {
        FijiSetup::for_os(Os::Linux, Some(dir), AutomatorConfig::default())
    }

    fn release(base: &str, tag: &str) -> ReleaseInfo {
        ReleaseInfo {
            tag: tag.to_string(),
            download_url: format!("{}/Thunder_STORM.jar", base),
            file_name: "Thunder_STORM.jar".to_string(),
        }
    }

    fn install_old_plugin(setup: &FijiSetup, tag: Option<&str>) -> PathBuf {
        fs::create_dir_all(&setup.plugins_dir).unwrap();
        let jar = setup.plugins_dir.join("thunderstorm-old.jar");
        fs::write(&jar, b"old").unwrap();
        if let Some(tag) = tag {
            write_installed_version(&setup.version_file(), tag).unwrap();
        }
        jar
    }

    // ── permissions ──

    #[test]
    fn missing_install_dir_checks_its_parent() {
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(&dir.path().join("not/yet/created"));
        assert!(setup.check_permissions());
    }

    // ── plugin install ──

    #[test]
    fn fresh_plugin_install_records_tag() {
        let base = test_server::serve(vec![(200, b"new jar".to_vec())]);
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(dir.path());

        let jar = setup
            .install_plugin_release(&test_server::client(), &release(&base, "v1.3"), ReinstallPolicy::Keep)
            .unwrap();
        assert_eq!(jar, setup.plugins_dir.join("Thunder_STORM.jar"));
        assert_eq!(fs::read(&jar).unwrap(), b"new jar");
        assert_eq!(read_installed_version(&setup.version_file()).as_deref(), Some("v1.3"));
    }

    #[test]
    fn keep_skips_current_plugin_without_downloading() {
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(dir.path());
        let old = install_old_plugin(&setup, Some("1.3.0"));

        // Unroutable URL: any download attempt would fail the test
        let jar = setup
            .install_plugin_release(&test_server::client(), &release("http://127.0.0.1:9", "v1.3"), ReinstallPolicy::Keep)
            .unwrap();
        assert_eq!(jar, old);
    }

    #[test]
    fn keep_leaves_unversioned_plugin_alone() {
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(dir.path());
        let old = install_old_plugin(&setup, None);

        let jar = setup
            .install_plugin_release(&test_server::client(), &release("http://127.0.0.1:9", "v9.9"), ReinstallPolicy::Keep)
            .unwrap();
        assert_eq!(jar, old);
    }

    #[test]
    fn keep_upgrades_known_older_plugin() {
        let base = test_server::serve(vec![(200, b"new jar".to_vec())]);
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(dir.path());
        let old = install_old_plugin(&setup, Some("v1.2"));

        let jar = setup
            .install_plugin_release(&test_server::client(), &release(&base, "v1.3"), ReinstallPolicy::Keep)
            .unwrap();
        assert!(!old.exists());
        assert!(jar.exists());
        assert_eq!(read_installed_version(&setup.version_file()).as_deref(), Some("v1.3"));
    }

    #[test]
    fn replace_always_downloads() {
        let base = test_server::serve(vec![(200, b"new jar".to_vec())]);
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(dir.path());
        let old = install_old_plugin(&setup, Some("v1.3"));

        setup
            .install_plugin_release(&test_server::client(), &release(&base, "v1.3"), ReinstallPolicy::Replace)
            .unwrap();
        assert!(!old.exists());
        assert!(setup.plugins_dir.join("Thunder_STORM.jar").exists());
    }

    #[test]
    fn failed_download_keeps_the_old_plugin() {
        let base = test_server::serve(vec![(500, b"oops".to_vec())]);
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(dir.path());
        let old = install_old_plugin(&setup, Some("v1.2"));

        let err = setup
            .install_plugin_release(&test_server::client(), &release(&base, "v1.3"), ReinstallPolicy::Replace)
            .unwrap_err();
        assert!(matches!(err, AutomatorError::Download { .. }));
        assert_eq!(fs::read(&old).unwrap(), b"old");
        assert_eq!(installed_plugin_jars(&setup.plugins_dir), vec![old]);
        assert_eq!(read_installed_version(&setup.version_file()).as_deref(), Some("v1.2"));
    }

    #[test]
    fn same_named_jar_is_replaced_in_place() {
        let base = test_server::serve(vec![(200, b"new jar".to_vec())]);
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(dir.path());
        fs::create_dir_all(&setup.plugins_dir).unwrap();
        let jar = setup.plugins_dir.join("Thunder_STORM.jar");
        fs::write(&jar, b"old").unwrap();

        let installed = setup
            .install_plugin_release(&test_server::client(), &release(&base, "v1.3"), ReinstallPolicy::Replace)
            .unwrap();
        assert_eq!(installed, jar);
        assert_eq!(fs::read(&jar).unwrap(), b"new jar");
    }

    // ── Fiji download ──

    fn fiji_zip(name: &str, body: &[u8]) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        zip.start_file(name, zip::write::SimpleFileOptions::default()).unwrap();
        zip.write_all(body).unwrap();
        zip.finish().unwrap().into_inner()
    }

    fn setup_with_fiji_url(dir: &Path, base: &str) -> FijiSetup {
        let mut config = AutomatorConfig::default();
        config.fiji.urls.linux = format!("{}/fiji-linux64.zip", base);
        FijiSetup::for_os(Os::Linux, Some(dir), config)
    }

    #[test]
    fn keep_leaves_existing_fiji_without_downloading() {
        let dir = tempfile::tempdir().unwrap();
        // Unroutable URL: any download attempt would fail the test
        let setup = setup_with_fiji_url(dir.path(), "http://127.0.0.1:9");
        fs::create_dir_all(&setup.fiji_dir).unwrap();
        let marker = setup.fiji_dir.join("local-macro.ijm");
        fs::write(&marker, b"keep me").unwrap();

        let fiji_dir = setup
            .install_fiji_with(&test_server::client(), ReinstallPolicy::Keep)
            .unwrap();
        assert_eq!(fiji_dir, setup.fiji_dir);
        assert!(marker.exists());
    }

    #[test]
    fn replace_removes_old_tree_before_unpacking() {
        let body = fiji_zip("Fiji.app/ImageJ-linux64", b"#!/bin/sh\n");
        let base = test_server::serve(vec![(200, body)]);
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_with_fiji_url(dir.path(), &base);
        fs::create_dir_all(&setup.plugins_dir).unwrap();
        let leftover = setup.plugins_dir.join("stale.jar");
        fs::write(&leftover, b"old").unwrap();

        setup
            .install_fiji_with(&test_server::client(), ReinstallPolicy::Replace)
            .unwrap();
        assert!(!leftover.exists());
        assert!(setup.fiji_executable().is_file());
    }

    #[test]
    fn fresh_install_downloads_and_unpacks() {
        let body = fiji_zip("Fiji.app/ImageJ-linux64", b"#!/bin/sh\n");
        let base = test_server::serve(vec![(200, body)]);
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_with_fiji_url(&dir.path().join("install"), &base);

        let fiji_dir = setup
            .install_fiji_with(&test_server::client(), ReinstallPolicy::Keep)
            .unwrap();
        assert_eq!(fiji_dir, setup.fiji_dir);
        assert!(setup.fiji_executable().is_file());
    }

    #[cfg(unix)]
    #[test]
    fn running_launcher_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(dir.path());
        let name = setup
            .fiji_executable()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();

        // `$0` carries the launcher name into the command line pgrep sees
        let mut child = std::process::Command::new("sh")
            .args(["-c", "sleep 5; true", &name])
            .spawn()
            .unwrap();
        let mut seen = setup.running_launcher();
        for _ in 0..20 {
            if seen.is_some() {
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
            seen = setup.running_launcher();
        }
        let _ = child.kill();
        let _ = child.wait();
        assert_eq!(seen, Some(name));
    }

    // ── Fiji unpack ──

    #[test]
    fn unpack_requires_fiji_dir_in_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("wrong.zip");
        let mut zip = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
        zip.start_file("something-else/readme.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"x").unwrap();
        zip.finish().unwrap();

        let setup = setup_in(&dir.path().join("install"));
        assert!(matches!(
            setup.unpack_fiji(&archive),
            Err(AutomatorError::Archive { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn unpack_makes_launcher_executable() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("fiji.zip");
        let mut zip = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
        let opts = zip::write::SimpleFileOptions::default().unix_permissions(0o644);
        zip.start_file("Fiji.app/ImageJ-linux64", opts).unwrap();
        zip.write_all(b"#!/bin/sh\n").unwrap();
        zip.finish().unwrap();

        let setup = setup_in(&dir.path().join("install"));
        setup.unpack_fiji(&archive).unwrap();
        let mode = fs::metadata(setup.fiji_executable()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    // ── verification ──

    #[test]
    fn verify_reports_missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(dir.path());
        assert!(matches!(
            setup.verify_installation(),
            Err(AutomatorError::ExecutableNotFound { .. })
        ));
    }

    #[test]
    fn verify_reports_missing_plugin() {
        let dir = tempfile::tempdir().unwrap();
        let setup = setup_in(dir.path());
        fs::create_dir_all(&setup.plugins_dir).unwrap();
        fs::write(setup.fiji_executable(), b"").unwrap();
        assert!(matches!(
            setup.verify_installation(),
            Err(AutomatorError::PluginMissing(_))
        ));
    }
}
