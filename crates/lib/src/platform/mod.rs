//! Build platforms and the host they are built on.
//!
//! A [`Platform`] is a build destination (one family of targets in the plan).
//! Each platform declares a [`GeneratorKind`], which is the only thing the
//! executor and post-build runner dispatch on.

pub mod os;

use std::fmt;

use serde::Serialize;

use os::Os;

/// The category of build-system project a target generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
  /// One build type per build directory, chosen at generate time.
  SingleConfigDesktop,
  /// Several build types per build directory, chosen at compile time.
  MultiConfigDesktop,
  /// Cross-compiled through an external toolchain file.
  CrossCompile,
  /// Firmware for an embedded board; fixed minimal configuration.
  Embedded,
}

impl GeneratorKind {
  /// Multi-configuration generators nest artifacts under a variant-named directory.
  pub fn is_multi_config(self) -> bool {
    matches!(self, GeneratorKind::MultiConfigDesktop)
  }
}

/// A build destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  Daisy,
  Android,
  Linux,
  Mac,
  Windows,
}

impl Platform {
  /// All platforms in plan order.
  pub const ALL: [Platform; 5] = [
    Platform::Daisy,
    Platform::Android,
    Platform::Linux,
    Platform::Mac,
    Platform::Windows,
  ];

  pub fn kind(self) -> GeneratorKind {
    match self {
      Platform::Daisy => GeneratorKind::Embedded,
      Platform::Android => GeneratorKind::CrossCompile,
      Platform::Linux => GeneratorKind::SingleConfigDesktop,
      Platform::Mac | Platform::Windows => GeneratorKind::MultiConfigDesktop,
    }
  }

  /// Name passed to the generate step's `-G` flag.
  pub fn generator(self) -> &'static str {
    match self {
      Platform::Daisy | Platform::Linux => "Unix Makefiles",
      Platform::Android => "Ninja",
      Platform::Mac => "Xcode",
      Platform::Windows => "Visual Studio 17 2022",
    }
  }

  /// Directory name under the build root.
  pub fn dir_name(self) -> &'static str {
    match self {
      Platform::Daisy => "Daisy",
      Platform::Android => "Android",
      Platform::Linux => "Linux",
      Platform::Mac => "Mac",
      Platform::Windows => "Windows",
    }
  }

  /// Suffix appended to executables produced for this platform.
  pub fn exe_suffix(self) -> &'static str {
    match self {
      Platform::Windows => ".exe",
      _ => "",
    }
  }

  /// The desktop platform matching the running host, if any.
  pub fn host() -> Option<Self> {
    Os::current().map(|os| os.desktop_platform())
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.dir_name())
  }
}
