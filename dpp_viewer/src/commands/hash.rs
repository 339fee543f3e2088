use clap::Args;
use dpp_core::catalog::material_id;

#[derive(Args)]
pub struct HashArgs {
    /// Material names exactly as authored in the model
    #[arg(required = true)]
    pub names: Vec<String>,
}

pub fn run(args: &HashArgs) {
    for name in &args.names {
        println!("{}  {}", material_id(name), name);
    }
}
