use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use crate::types::RunContext;

pub const VARIANT_FILE_MARKERS: [&str; 3] = [
    "CombinedVariantOutput.tsv",
    "CopyNumberVariants.vcf",
    "MergedSmallVariants.genome.vcf",
];

#[derive(Debug)]
pub enum ArchiveError {
    IoError(io::Error),
    ZipError(zip::result::ZipError),
    UnsafeEntry(String),
}

impl From<io::Error> for ArchiveError {
    fn from(err: io::Error) -> Self {
        ArchiveError::IoError(err)
    }
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        ArchiveError::ZipError(err)
    }
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveError::IoError(e) => write!(f, "io error: {}", e),
            ArchiveError::ZipError(e) => write!(f, "zip error: {}", e),
            ArchiveError::UnsafeEntry(name) => write!(f, "unsafe archive entry '{}'", name),
        }
    }
}

impl std::error::Error for ArchiveError {}

pub fn is_variant_file(name: &str) -> bool {
    VARIANT_FILE_MARKERS
        .iter()
        .any(|marker| name.contains(marker))
}

pub struct AssembledArchive {
    pub archive: PathBuf,
    pub included: Vec<String>,
    pub excluded: Vec<String>,
}

pub struct ArchiveAssembler {
    sample_name: String,
    input_zip: PathBuf,
    outdir: PathBuf,
    scratch_prefix: String,
}

impl ArchiveAssembler {
    pub fn new(sample_name: &str, input_zip: &Path, outdir: &Path, run: &RunContext) -> Self {
        ArchiveAssembler {
            sample_name: sample_name.to_string(),
            input_zip: input_zip.to_path_buf(),
            outdir: outdir.to_path_buf(),
            scratch_prefix: format!("extract_{}_", run.run_id),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.outdir.join(format!("{}.zip", self.sample_name))
    }

    pub async fn assemble(&self, manifest: &Path) -> Result<AssembledArchive, ArchiveError> {
        async_fs::create_dir_all(&self.outdir).await?;
        let scratch = tempfile::Builder::new()
            .prefix(&self.scratch_prefix)
            .tempdir_in(&self.outdir)?;

        let result = self.repack(scratch.path(), manifest);
        if result.is_err() {
            let _ = std::fs::remove_file(self.output_path());
        }

        // Intermediary state goes away on success and failure alike; a failed
        // run must not leave a partial archive behind.
        let manifest_cleanup = async_fs::remove_file(manifest).await;
        let scratch_cleanup = scratch.close();

        let summary = result?;
        manifest_cleanup?;
        scratch_cleanup?;
        Ok(summary)
    }

    fn repack(&self, scratch: &Path, manifest: &Path) -> Result<AssembledArchive, ArchiveError> {
        self.extract_into(scratch)?;

        let mut files = Vec::new();
        collect_files(scratch, &mut files)?;

        // Output entries are flattened to their base names.
        let mut keep: Vec<(PathBuf, String)> = Vec::new();
        let mut excluded: Vec<String> = Vec::new();
        for path in files {
            let name = entry_file_name(&path)?;
            if is_variant_file(&name) {
                keep.push((path, name));
            } else {
                excluded.push(name);
            }
        }
        keep.sort_by(|a, b| a.1.cmp(&b.1));
        excluded.sort();

        let included = self.write_archive(&keep, manifest)?;

        Ok(AssembledArchive {
            archive: self.output_path(),
            included,
            excluded,
        })
    }

    fn extract_into(&self, scratch: &Path) -> Result<(), ArchiveError> {
        let file = File::open(&self.input_zip)?;
        let mut archive = zip::ZipArchive::new(file)?;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let relative = match entry.enclosed_name() {
                Some(name) => name,
                None => return Err(ArchiveError::UnsafeEntry(entry.name().to_string())),
            };
            let target = scratch.join(relative);

            if entry.is_dir() {
                std::fs::create_dir_all(&target)?;
                continue;
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&target)?;
            io::copy(&mut entry, &mut outfile)?;
        }

        Ok(())
    }

    fn write_archive(
        &self,
        keep: &[(PathBuf, String)],
        manifest: &Path,
    ) -> Result<Vec<String>, ArchiveError> {
        let file = File::create(self.output_path())?;
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();

        let mut included = Vec::new();
        let manifest_name = format!("{}.xml", self.sample_name);
        writer.start_file(manifest_name.as_str(), options)?;
        let mut source = File::open(manifest)?;
        io::copy(&mut source, &mut writer)?;
        included.push(manifest_name);

        for (path, name) in keep {
            writer.start_file(name.as_str(), options)?;
            let mut source = File::open(path)?;
            io::copy(&mut source, &mut writer)?;
            included.push(name.clone());
        }

        writer.finish()?;
        Ok(included)
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ArchiveError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

fn entry_file_name(path: &Path) -> Result<String, ArchiveError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
        .ok_or_else(|| ArchiveError::UnsafeEntry(path.display().to_string()))
}
