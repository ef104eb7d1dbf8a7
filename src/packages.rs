use indexmap::IndexMap;

use crate::platform::Platform;

/// Ordered mapping from a package's logical name to its install specifier.
/// Iteration order is insertion order; overlay merges overwrite values in
/// place and append new keys at the end.
pub type PackageTable = IndexMap<&'static str, &'static str>;

/// Conda channels, searched in this order.
pub const CHANNELS: [&str; 3] = ["defaults", "conda-forge", "pytorch"];

/// Conda packages shared by every environment. Returns a fresh table per
/// call so merges in one generation never leak into the next.
pub fn conda_base() -> PackageTable {
    let mut table = PackageTable::new();

    table.insert("python", "python==3.6.8");
    table.insert("pip", "pip>=19.1.1");
    table.insert("ipykernel", "ipykernel>=4.6.1");
    table.insert("jupyter", "jupyter>=1.0.0");
    table.insert("matplotlib", "matplotlib>=2.2.2");
    table.insert("numpy", "numpy>=1.13.3");
    table.insert("pandas", "pandas>=0.24.2");
    table.insert("pytest", "pytest>=3.6.4");
    table.insert("pytorch", "pytorch-cpu>=1.0.0");
    table.insert("scipy", "scipy>=1.0.0");
    table.insert("tensorflow", "tensorflow==1.12.0");
    table.insert("h5py", "h5py>=2.8.0");
    table.insert("tensorflow-hub", "tensorflow-hub==0.5.0");
    table.insert("py-xgboost", "py-xgboost<=0.80");

    table
}

/// Conda packages that replace their CPU counterparts when GPU support is
/// requested.
pub fn conda_gpu() -> PackageTable {
    let mut table = PackageTable::new();

    table.insert("numba", "numba>=0.38.1");
    table.insert("pytorch", "pytorch>=1.0.0");
    table.insert("tensorflow", "tensorflow-gpu==1.12.0");

    table
}

/// Platform-specific conda packages, applied on top of the base table
/// regardless of the GPU flag.
pub fn conda_platform(platform: Platform) -> PackageTable {
    let mut table = PackageTable::new();

    match platform {
        Platform::MacOs => {}
        Platform::Linux => {
            table.insert("cudatoolkit", "cudatoolkit>=9.2");
        }
        Platform::Windows => {
            table.insert("pytorch", "pytorch==1.0.0");
            table.insert("cudatoolkit", "cuda90");
        }
    }

    table
}

/// Pip packages shared by every environment.
pub fn pip_base() -> PackageTable {
    let mut table = PackageTable::new();

    table.insert("allennlp", "allennlp==0.8.4");
    table.insert("azureml-sdk[automl]", "azureml-sdk[automl]==1.0.48");
    table.insert("azureml-train-automl", "azureml-train-automl==1.0.48");
    table.insert("azureml-dataprep", "azureml-dataprep==1.1.8");
    table.insert("azureml-widgets", "azureml-widgets==1.0.48");
    table.insert("azureml-mlflow", "azureml-mlflow>=1.0.43.1");
    table.insert("black", "black>=18.6b4");
    table.insert("cached-property", "cached-property==1.5.1");
    table.insert("dask", "dask[dataframe]==1.2.2");
    table.insert("papermill", "papermill>=1.0.1");
    table.insert("nteract-scrapbook", "nteract-scrapbook>=0.2.1");
    table.insert("pydocumentdb", "pydocumentdb>=2.3.3");
    table.insert("tqdm", "tqdm==4.31.1");
    table.insert("pyemd", "pyemd==0.5.1");
    table.insert("ipywebrtc", "ipywebrtc==0.4.3");
    table.insert("pre-commit", "pre-commit>=1.14.4");
    table.insert("scikit-learn", "scikit-learn>=0.19.0,<=0.20.3");
    table.insert("setuptools_scm", "setuptools_scm==3.2.");
    table.insert("sklearn-crfsuite", "sklearn-crfsuite>=0.3.6");
    table.insert("spacy", "spacy>=2.1.4");
    table.insert(
        "spacy-models",
        "https://github.com/explosion/spacy-models/releases/download/\
         en_core_web_sm-2.1.0/en_core_web_sm-2.1.0.tar.gz",
    );
    table.insert("gensim", "gensim>=3.7.0");
    table.insert("nltk", "nltk>=3.4");
    table.insert("pytorch-pretrained-bert", "pytorch-pretrained-bert>=0.6");
    table.insert("seqeval", "seqeval>=0.0.12");

    table
}

/// Platform-specific pip packages, applied on top of the base table
/// regardless of the GPU flag. Empty for all three families today; kept so
/// platform additions slot in without touching the merge logic.
pub fn pip_platform(platform: Platform) -> PackageTable {
    match platform {
        Platform::MacOs | Platform::Linux | Platform::Windows => PackageTable::new(),
    }
}

/// Platform-specific pip packages added only when GPU support is requested.
/// macOS and Linux pull in horovod for distributed training; Windows has no
/// GPU-only pip packages.
pub fn pip_gpu(platform: Platform) -> PackageTable {
    let mut table = PackageTable::new();

    match platform {
        Platform::MacOs | Platform::Linux => {
            table.insert("horovod", "horovod>=0.16.1");
        }
        Platform::Windows => {}
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_tables_populated() {
        assert_eq!(conda_base().len(), 14);
        assert_eq!(pip_base().len(), 25);
        assert!(conda_base().contains_key("python"));
        assert!(pip_base().contains_key("spacy"));
    }

    #[test]
    fn test_gpu_overlay_replaces_frameworks() {
        let gpu = conda_gpu();
        assert_eq!(gpu.get("pytorch"), Some(&"pytorch>=1.0.0"));
        assert_eq!(gpu.get("tensorflow"), Some(&"tensorflow-gpu==1.12.0"));
    }

    #[test]
    fn test_platform_overlays() {
        assert!(conda_platform(Platform::MacOs).is_empty());
        assert!(conda_platform(Platform::Linux).contains_key("cudatoolkit"));
        assert_eq!(
            conda_platform(Platform::Windows).get("pytorch"),
            Some(&"pytorch==1.0.0")
        );

        assert!(pip_gpu(Platform::Linux).contains_key("horovod"));
        assert!(pip_gpu(Platform::MacOs).contains_key("horovod"));
        assert!(pip_gpu(Platform::Windows).is_empty());
    }
}
