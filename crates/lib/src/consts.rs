//! Names, environment variables, and built-in defaults shared across the crate.

pub const APP_NAME: &str = "barelybuild";

/// Name of the build root created under the source directory.
pub const BUILD_DIR_NAME: &str = "build";

// Environment overrides, read once by `ToolchainEnv::from_env`.
pub const ANDROID_NDK_HOME_ENV: &str = "ANDROID_NDK_HOME";
pub const DAISY_TOOLCHAIN_PREFIX_ENV: &str = "DAISY_TOOLCHAIN_PREFIX";
pub const CMAKE_ENV: &str = "BARELYBUILD_CMAKE";
pub const CTEST_ENV: &str = "BARELYBUILD_CTEST";
pub const MAKE_ENV: &str = "BARELYBUILD_MAKE";
pub const PYTHON_ENV: &str = "BARELYBUILD_PYTHON";

pub const DEFAULT_ANDROID_NDK_HOME: &str = "C:/Microsoft/AndroidSDK/ndk/27.0.12077973";
pub const DEFAULT_DAISY_TOOLCHAIN_PREFIX: &str = "C:/Program Files/DaisyToolchain";
pub const DEFAULT_CMAKE: &str = "cmake";
pub const DEFAULT_CTEST: &str = "ctest";
pub const DEFAULT_MAKE: &str = "make";
pub const DEFAULT_PYTHON: &str = "python";

pub const DEFAULT_ANDROID_MIN_API: u32 = 21;
pub const DEFAULT_BENCHMARK_OUT: &str = "benchmark.json";

/// Toolchain file inside the NDK root.
pub const ANDROID_TOOLCHAIN_FILE: &str = "build/cmake/android.toolchain.cmake";

/// Relative to the Daisy build directory, fetched by the generate step itself.
pub const DAISY_TOOLCHAIN_FILE: &str = "_deps/libdaisy-src/cmake/toolchains/stm32h750xx.cmake";

pub const DAISY_FLASH_TARGET: &str = "barelymusiciandaisy_program_dfu";
pub const DEMO_TARGET_PREFIX: &str = "examples_demo_";
pub const BENCHMARK_BINARY: &str = "barelymusician_benchmark";
pub const BENCHMARK_COMPARE_SCRIPT: &str = "_deps/benchmark-src/tools/compare.py";
