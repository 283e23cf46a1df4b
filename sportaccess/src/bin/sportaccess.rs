use clap::Parser;
use sportaccess::app::AccessApp;

fn main() {
    env_logger::init();
    let args = AccessApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
