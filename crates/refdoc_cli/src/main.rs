/* 📖 # Why is the CLI minimal and hardcoded?

There is nothing to choose at the command line: everything that varies between sites
lives in `refdoc.toml`. Run `refdoc` in a directory containing that file and the
configured outputs are written relative to it.

Exit codes:
- 0: Success (all configured outputs written)
- 1: Error (config missing or invalid, registry invalid, or an output could not be written)
*/

use std::env;
use std::process;

use tracing::debug;

use refdoc_base::tracing::init_tracing;
use refdoc_base::{FilePath, PalHandle, RealPal};
use refdoc_engine::{CONFIG_FILE_NAME, build_site, load_config};

fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Error: Failed to initialise logging: {}", e);
        process::exit(1);
    }

    let current_dir = env::current_dir().unwrap_or_else(|e| {
        eprintln!("Error: Failed to get current directory: {}", e);
        process::exit(1);
    });
    debug!(dir = %current_dir.display(), "working directory");

    let pal = PalHandle::new(RealPal::new(current_dir));

    let config = match load_config(&pal, &FilePath::from(CONFIG_FILE_NAME)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config from {}: {}", CONFIG_FILE_NAME, e);
            process::exit(1);
        }
    };

    println!("Configuration loaded: {}", config.title);

    let report = match build_site(&pal, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: Failed to build reference: {}", e);
            process::exit(1);
        }
    };

    if !report.warnings.is_empty() {
        eprintln!("\nWarnings:");
        for warning in &report.warnings {
            eprintln!("  - {}", warning);
        }
    }

    println!(
        "Documented {} endpoints across {} services",
        report.endpoints, report.services
    );
    for path in &report.written {
        println!("  + {}", path);
    }
}
