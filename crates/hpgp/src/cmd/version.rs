use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("hpgp {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: hpgp");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("HPGP_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("mmv: {}", hpgp_frame::MMV);
    println!("min_frame_len: {}", hpgp_frame::MIN_FRAME_LEN);
    println!("max_frame_len: {}", hpgp_frame::MAX_FRAME_LEN);

    Ok(SUCCESS)
}
