use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::packages::{self, PackageTable};
use crate::platform::Platform;

pub const MANIFEST_EXTENSION: &str = "yaml";

const DEFAULT_CPU_NAME: &str = "nlp_cpu";
const DEFAULT_GPU_NAME: &str = "nlp_gpu";

/// Instructions for using the generated file, printed on success and
/// embedded as the comment header of the file itself.
pub fn usage_instructions(env_name: &str) -> String {
    format!(
        "\nTo create the conda environment:\n\
         $ conda env create -f {env}.yaml\n\
         \n\
         To update the conda environment:\n\
         $ conda env update -f {env}.yaml\n\
         \n\
         To register the conda environment in Jupyter:\n\
         $ conda activate {env}\n\
         $ python -m ipykernel install --user --name {env} \
         --display-name \"Python ({env})\"\n",
        env = env_name
    )
}

/// The fully resolved inputs for one generation run: environment name plus
/// the conda and pip tables with all overlays merged in.
#[derive(Debug, Clone)]
pub struct EnvironmentDescriptor {
    pub name: String,
    pub gpu: bool,
    pub platform: Platform,
    pub conda_packages: PackageTable,
    pub pip_packages: PackageTable,
}

impl EnvironmentDescriptor {
    /// Select and merge the package tables for the given flags. Merge order
    /// is base, then platform overlay, then GPU overlay; overlays overwrite
    /// shared keys in place and append new keys at the end.
    pub fn resolve(name: Option<&str>, gpu: bool, platform: Platform) -> Self {
        let name = match name {
            Some(name) => name.to_string(),
            None if gpu => DEFAULT_GPU_NAME.to_string(),
            None => DEFAULT_CPU_NAME.to_string(),
        };

        let mut conda_packages = packages::conda_base();
        let mut pip_packages = packages::pip_base();

        merge(&mut conda_packages, packages::conda_platform(platform));
        merge(&mut pip_packages, packages::pip_platform(platform));

        if gpu {
            merge(&mut conda_packages, packages::conda_gpu());
            merge(&mut pip_packages, packages::pip_gpu(platform));
        }

        Self {
            name,
            gpu,
            platform,
            conda_packages,
            pip_packages,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, MANIFEST_EXTENSION)
    }

    /// Render the environment file: comment header, name, channels, conda
    /// dependencies, then the nested pip block.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for line in usage_instructions(&self.name).split('\n') {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }

        out.push_str(&format!("name: {}\n", self.name));

        out.push_str("channels:\n");
        for channel in packages::CHANNELS {
            out.push_str(&format!("- {}\n", channel));
        }

        out.push_str("dependencies:\n");
        for spec in self.conda_packages.values() {
            out.push_str(&format!("- {}\n", spec));
        }

        out.push_str("- pip:\n");
        for spec in self.pip_packages.values() {
            out.push_str(&format!("  - {}\n", spec));
        }

        out
    }
}

fn merge(base: &mut PackageTable, overlay: PackageTable) {
    for (name, spec) in overlay {
        base.insert(name, spec);
    }
}

pub struct ManifestGenerator {
    output_dir: PathBuf,
}

impl ManifestGenerator {
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }

    pub fn with_output_dir(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Produce the rendered environment file text and its file name without
    /// touching the filesystem.
    pub fn generate(
        &self,
        name: Option<&str>,
        gpu: bool,
        platform: Platform,
    ) -> (String, String) {
        let descriptor = EnvironmentDescriptor::resolve(name, gpu, platform);
        (descriptor.render(), descriptor.file_name())
    }

    pub fn write_manifest(&self, manifest: &str, file_name: &str) -> Result<PathBuf> {
        let manifest_path = self.output_dir.join(file_name);

        fs::write(&manifest_path, manifest).with_context(|| {
            format!(
                "Failed to write environment file to {}",
                manifest_path.display()
            )
        })?;

        Ok(manifest_path)
    }
}

impl Default for ManifestGenerator {
    fn default() -> Self {
        Self::new()
    }
}
