use barelybuild_lib::platform::Platform;
use barelybuild_lib::platform::os::Os;

use crate::output::{print_info, print_stat};

pub fn cmd_info() {
  println!("System:");
  match Os::current() {
    Some(os) => {
      print_stat("OS", os.as_str());
      print_stat("Arch", std::env::consts::ARCH);
      print_stat("Host build directory", os.desktop_platform().dir_name());
    }
    None => print_info("Could not detect a supported host; desktop platforms default to off."),
  }
  println!();
  println!("Platforms:");
  for platform in Platform::ALL {
    print_stat(platform.dir_name(), platform.generator());
  }
}
