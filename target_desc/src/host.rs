use crate::Target;
use crate::TargetSupportError;
use crate::TargetTable;
use std::env;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HostOs {
    Osx,
    Linux,
    Windows,
}

impl HostOs {
    pub fn current() -> Result<Self, TargetSupportError> {
        Self::from_os_name(env::consts::OS)
    }

    pub fn from_os_name(os: &str) -> Result<Self, TargetSupportError> {
        match os {
            "macos" => Ok(HostOs::Osx),
            "linux" => Ok(HostOs::Linux),
            "windows" => Ok(HostOs::Windows),
            other => Err(TargetSupportError::UnknownOperatingSystem(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HostOs::Osx => "osx",
            HostOs::Linux => "linux",
            HostOs::Windows => "windows",
        }
    }

    pub fn simple_name(self) -> &'static str {
        match self {
            HostOs::Osx => "macos",
            other => other.name(),
        }
    }

    pub fn target(self) -> Target {
        match self {
            HostOs::Osx => Target::Macbook,
            HostOs::Linux => Target::Linux,
            HostOs::Windows => Target::Mingw,
        }
    }
}

pub fn host_arch() -> Result<&'static str, TargetSupportError> {
    host_arch_from(env::consts::ARCH)
}

pub fn host_arch_from(arch: &str) -> Result<&'static str, TargetSupportError> {
    match arch {
        "x86_64" | "amd64" => Ok("x86_64"),
        "aarch64" | "arm64" => Ok("arm64"),
        other => Err(TargetSupportError::UnknownHardwarePlatform(other.to_string())),
    }
}

pub fn host_target() -> Result<Target, TargetSupportError> {
    HostOs::current().map(HostOs::target)
}

pub fn host_target_suffix(host: &Target, target: &Target) -> String {
    if target == host {
        host.detailed_name().into_owned()
    } else {
        format!("{}-{}", host.detailed_name(), target.detailed_name())
    }
}

pub fn longer_system_name(host: &Target) -> Result<&'static str, TargetSupportError> {
    match host {
        Target::Macbook => Ok("darwin-macos"),
        Target::Linux => Ok("linux-x86-64"),
        Target::Mingw => Ok("windows-x86-64"),
        other => Err(TargetSupportError::UnsupportedHost(other.clone())),
    }
}

pub fn jni_host_platform_include_dir(host: &Target) -> Result<&'static str, TargetSupportError> {
    match host {
        Target::Macbook => Ok("darwin"),
        Target::Linux => Ok("linux"),
        Target::Mingw => Ok("win32"),
        other => Err(TargetSupportError::UnsupportedHost(other.clone())),
    }
}

/// Targets that the given host is able to build for
pub fn enabled_targets(host: &Target, table: &TargetTable) -> Result<Vec<Target>, TargetSupportError> {
    let mut enabled = match host {
        Target::Linux => vec![
            Target::Linux,
            Target::RaspberryPi,
            Target::LinuxMips32,
            Target::LinuxMipsel32,
            Target::AndroidArm32,
            Target::AndroidArm64,
            Target::Wasm32,
        ],

        Target::Mingw => return Ok(vec![Target::Mingw]),

        Target::Macbook => vec![
            Target::Macbook,
            Target::Iphone,
            Target::IphoneSim,
            Target::AndroidArm32,
            Target::AndroidArm64,
            Target::Wasm32,
        ],

        other => return Err(TargetSupportError::UnsupportedHost(other.clone())),
    };

    enabled.extend(table.zephyr_targets().cloned());
    Ok(enabled)
}

/// Resolves the target requested by the user against the table of known targets
#[derive(Debug, Clone)]
pub struct TargetManager<'a> {
    table: &'a TargetTable,
    host: Target,
    target: Target,
}

impl<'a> TargetManager<'a> {
    pub fn new(table: &'a TargetTable, user_request: Option<&str>) -> Result<Self, TargetSupportError> {
        Self::for_host(table, host_target()?, user_request)
    }

    pub fn for_host(
        table: &'a TargetTable,
        host: Target,
        user_request: Option<&str>,
    ) -> Result<Self, TargetSupportError> {
        let target = match user_request {
            None | Some("host") => host.clone(),
            Some(name) => table.known(name)?.clone(),
        };

        Ok(Self {
            table,
            host,
            target,
        })
    }

    pub fn host(&self) -> &Target {
        &self.host
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn target_suffix(&self) -> String {
        self.target.detailed_name().into_owned()
    }

    pub fn host_target_suffix(&self) -> String {
        host_target_suffix(&self.host, &self.target)
    }

    pub fn is_enabled(&self, target: &Target) -> bool {
        enabled_targets(&self.host, self.table)
            .map(|enabled| enabled.contains(target))
            .unwrap_or(false)
    }

    /// One line per target this host can build for, with the selected target marked
    pub fn list(&self) -> Result<Vec<String>, TargetSupportError> {
        let lines = enabled_targets(&self.host, self.table)?
            .into_iter()
            .map(|target| {
                let is_default = if target == self.target { "(default)" } else { "" };
                let name = format!("{}:", target.name());
                format!("{:<30}{:<10}", name, is_default).trim_end().to_string()
            })
            .collect();

        Ok(lines)
    }
}
