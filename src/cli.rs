use anyhow::Result;
use clap::Parser;

use crate::generator::{usage_instructions, EnvironmentDescriptor, ManifestGenerator};
use crate::platform::Platform;

#[derive(Parser)]
#[command(name = "condagen")]
#[command(
    about = "Generates a conda environment file for different setups. \
             Plain python is the default, but flags can be used to support GPU functionality."
)]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Specify name of conda environment
    #[arg(long)]
    pub name: Option<String>,

    /// Include packages for GPU support
    #[arg(long)]
    pub gpu: bool,
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    generate_command(cli.name.as_deref(), cli.gpu)
}

fn generate_command(name: Option<&str>, gpu: bool) -> Result<()> {
    // Detected once at startup; an unrecognized host is the one fatal error.
    let platform = Platform::detect()?;

    let descriptor = EnvironmentDescriptor::resolve(name, gpu, platform);
    let manifest = descriptor.render();

    let generator = ManifestGenerator::new();
    let manifest_path = generator.write_manifest(&manifest, &descriptor.file_name())?;

    println!("Generated conda file: {}", manifest_path.display());
    println!("{}", usage_instructions(&descriptor.name));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["condagen", "--name", "foo", "--gpu"]);
        assert_eq!(cli.name.as_deref(), Some("foo"));
        assert!(cli.gpu);

        let cli = Cli::parse_from(["condagen"]);
        assert_eq!(cli.name, None);
        assert!(!cli.gpu);
    }

    #[test]
    fn test_cli_rejects_positional_args() {
        assert!(Cli::try_parse_from(["condagen", "extra"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
