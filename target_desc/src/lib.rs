mod host;
mod layout;
mod output;

pub use host::*;
pub use layout::*;
pub use output::*;

use common::DiagnosticOutput;
use linked_hash_map::LinkedHashMap;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Family {
    Osx,
    Ios,
    Linux,
    Windows,
    Android,
    Wasm,
    Zephyr,
}

impl Family {
    pub fn exe_suffix(self) -> &'static str {
        match self {
            Family::Osx | Family::Ios | Family::Linux => "kexe",
            Family::Windows => "exe",
            Family::Android => "so",
            Family::Wasm => "wasm",
            Family::Zephyr => "o",
        }
    }

    pub fn dynamic_prefix(self) -> &'static str {
        match self {
            Family::Windows | Family::Wasm => "",
            _ => "lib",
        }
    }

    pub fn dynamic_suffix(self) -> &'static str {
        match self {
            Family::Osx | Family::Ios => "dylib",
            Family::Linux | Family::Android => "so",
            Family::Windows => "dll",
            Family::Wasm => "wasm",
            Family::Zephyr => "a",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Architecture {
    X64,
    Arm64,
    Arm32,
    Mips32,
    Mipsel32,
    Wasm32,
}

impl Architecture {
    pub fn bitness(self) -> usize {
        match self {
            Architecture::X64 | Architecture::Arm64 => 64,
            Architecture::Arm32
            | Architecture::Mips32
            | Architecture::Mipsel32
            | Architecture::Wasm32 => 32,
        }
    }
}

pub const ZEPHYR_GENERIC_NAME: &str = "zephyr";

// boards available for the configurable embedded target family
pub const ZEPHYR_BOARDS: &[&str] = &["stm32f4-disco"];

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Target {
    AndroidArm32,
    AndroidArm64,
    Iphone,
    IphoneSim,
    Linux,
    Mingw,
    Macbook,
    RaspberryPi,
    LinuxMips32,
    LinuxMipsel32,
    Wasm32,

    /// embedded board target, named `{generic_name}_{board}`
    Zephyr {
        board: String,
        generic_name: String,
    },
}

pub const PREDEFINED_TARGETS: [Target; 11] = [
    Target::AndroidArm32,
    Target::AndroidArm64,
    Target::Iphone,
    Target::IphoneSim,
    Target::Linux,
    Target::Mingw,
    Target::Macbook,
    Target::RaspberryPi,
    Target::LinuxMips32,
    Target::LinuxMipsel32,
    Target::Wasm32,
];

impl Target {
    pub fn zephyr(board: impl Into<String>) -> Self {
        Target::Zephyr {
            board: board.into(),
            generic_name: ZEPHYR_GENERIC_NAME.to_string(),
        }
    }

    pub fn name(&self) -> Cow<str> {
        let name = match self {
            Target::AndroidArm32 => "android_arm32",
            Target::AndroidArm64 => "android_arm64",
            Target::Iphone => "iphone",
            Target::IphoneSim => "iphone_sim",
            Target::Linux => "linux",
            Target::Mingw => "mingw",
            Target::Macbook => "macbook",
            Target::RaspberryPi => "raspberrypi",
            Target::LinuxMips32 => "linux_mips32",
            Target::LinuxMipsel32 => "linux_mipsel32",
            Target::Wasm32 => "wasm32",
            Target::Zephyr { board, generic_name } => {
                return Cow::Owned(format!("{}_{}", generic_name, board));
            },
        };

        Cow::Borrowed(name)
    }

    pub fn detailed_name(&self) -> Cow<str> {
        match self {
            Target::Iphone => Cow::Borrowed("ios"),
            Target::IphoneSim => Cow::Borrowed("ios_sim"),
            Target::Macbook => Cow::Borrowed("osx"),
            other => other.name(),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Target::AndroidArm32 | Target::AndroidArm64 => Family::Android,
            Target::Iphone | Target::IphoneSim => Family::Ios,
            Target::Linux
            | Target::RaspberryPi
            | Target::LinuxMips32
            | Target::LinuxMipsel32 => Family::Linux,
            Target::Mingw => Family::Windows,
            Target::Macbook => Family::Osx,
            Target::Wasm32 => Family::Wasm,
            Target::Zephyr { .. } => Family::Zephyr,
        }
    }

    pub fn architecture(&self) -> Architecture {
        match self {
            Target::AndroidArm32 | Target::RaspberryPi | Target::Zephyr { .. } => {
                Architecture::Arm32
            },
            Target::AndroidArm64 | Target::Iphone => Architecture::Arm64,
            Target::IphoneSim | Target::Linux | Target::Mingw | Target::Macbook => {
                Architecture::X64
            },
            Target::LinuxMips32 => Architecture::Mips32,
            Target::LinuxMipsel32 => Architecture::Mipsel32,
            Target::Wasm32 => Architecture::Wasm32,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// All targets known to this build, keyed by name. Built once and never modified afterwards.
#[derive(Debug, Clone)]
pub struct TargetTable {
    targets: LinkedHashMap<String, Target>,
}

impl TargetTable {
    pub fn new() -> Self {
        let boards = ZEPHYR_BOARDS.iter().map(|board| Target::zephyr(*board));

        let targets = PREDEFINED_TARGETS
            .iter()
            .cloned()
            .chain(boards)
            .map(|target| (target.name().into_owned(), target))
            .collect();

        Self { targets }
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.get(name)
    }

    pub fn known(&self, name: &str) -> Result<&Target, TargetSupportError> {
        self.get(name)
            .ok_or_else(|| TargetSupportError::UnknownTarget(name.to_string()))
    }

    pub fn zephyr_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets
            .values()
            .filter(|target| matches!(target, Target::Zephyr { .. }))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TargetSupportError {
    UnknownTarget(String),
    UnknownOperatingSystem(String),
    UnknownHardwarePlatform(String),
    UnsupportedHost(Target),
}

impl fmt::Display for TargetSupportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TargetSupportError::UnknownTarget(name) => write!(f, "Unknown target: {}", name),
            TargetSupportError::UnknownOperatingSystem(os) => {
                write!(f, "Unknown operating system: {}", os)
            },
            TargetSupportError::UnknownHardwarePlatform(arch) => {
                write!(f, "Unknown hardware platform: {}", arch)
            },
            TargetSupportError::UnsupportedHost(host) => write!(f, "Unknown host: {}", host),
        }
    }
}

impl DiagnosticOutput for TargetSupportError {
    fn notes(&self) -> Vec<String> {
        match self {
            TargetSupportError::UnknownTarget(..) => {
                vec!["use --list-targets to see the list of available targets".to_string()]
            },
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod test;
