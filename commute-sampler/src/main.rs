use clap::Parser;
use commute_sampler::app::SamplerCliArguments;

fn main() {
    env_logger::init();
    let args = SamplerCliArguments::parse();
    match args.op.run() {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running commute-sampler: {e}");
            std::process::exit(1);
        }
    }
}
