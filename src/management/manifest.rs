use std::{io, path::PathBuf};

use xmltree::{Element, EmitterConfig, XMLNode};

#[derive(Debug)]
pub enum ManifestError {
    IoError(io::Error),
    ParseError(xmltree::ParseError),
    EmitError(xmltree::Error),
    MissingElement(&'static str),
}

impl From<io::Error> for ManifestError {
    fn from(err: io::Error) -> Self {
        ManifestError::IoError(err)
    }
}

impl From<xmltree::ParseError> for ManifestError {
    fn from(err: xmltree::ParseError) -> Self {
        ManifestError::ParseError(err)
    }
}

impl From<xmltree::Error> for ManifestError {
    fn from(err: xmltree::Error) -> Self {
        ManifestError::EmitError(err)
    }
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::IoError(e) => write!(f, "io error: {}", e),
            ManifestError::ParseError(e) => write!(f, "cannot parse template: {}", e),
            ManifestError::EmitError(e) => write!(f, "cannot serialize manifest: {}", e),
            ManifestError::MissingElement(name) => {
                write!(f, "template is missing the '{}' element", name)
            }
        }
    }
}

impl std::error::Error for ManifestError {}

pub fn variant_filenames(sample_name: &str) -> Vec<String> {
    vec![
        format!("{}_CombinedVariantOutput.tsv", sample_name),
        format!("{}_CopyNumberVariants.vcf", sample_name),
        format!("{}_MergedSmallVariants.genome.vcf", sample_name),
    ]
}

pub struct ManifestBuilder {
    sample_name: String,
    template_path: PathBuf,
    outdir: PathBuf,
}

impl ManifestBuilder {
    pub fn new(sample_name: &str, template_path: PathBuf, outdir: PathBuf) -> Self {
        ManifestBuilder {
            sample_name: sample_name.to_string(),
            template_path,
            outdir,
        }
    }

    pub fn outfile(&self) -> PathBuf {
        self.outdir.join(format!("{}.xml", self.sample_name))
    }

    pub async fn build(&self) -> Result<Element, ManifestError> {
        let template = async_fs::read(&self.template_path).await?;
        let mut root = Element::parse(template.as_slice())?;

        let sample = root
            .get_mut_child("Sample")
            .ok_or(ManifestError::MissingElement("Sample"))?;
        sample
            .children
            .push(XMLNode::Element(text_element("Name", &self.sample_name)));
        sample.children.push(XMLNode::Element(text_element(
            "SubjectId",
            &self.sample_name,
        )));

        let filenames = sample
            .get_mut_child("VariantsFilenames")
            .ok_or(ManifestError::MissingElement("VariantsFilenames"))?;
        for filename in variant_filenames(&self.sample_name) {
            filenames.children.push(XMLNode::Element(text_element(
                "VariantsFilename",
                &filename,
            )));
        }

        order_elements(&mut root);
        Ok(root)
    }

    pub async fn write(&self) -> Result<PathBuf, ManifestError> {
        let root = self.build().await?;

        let mut serialized = Vec::new();
        let emitter = EmitterConfig::new().write_document_declaration(false);
        root.write_with_config(&mut serialized, emitter)?;

        async_fs::create_dir_all(&self.outdir).await?;
        let outfile = self.outfile();
        async_fs::write(&outfile, serialized).await?;
        Ok(outfile)
    }
}

// The upload API expects a fixed element order: root children sorted by
// (tag, name attribute), each child's children by (tag, desc attribute).
// Absent attributes order before any present value.
pub fn order_elements(root: &mut Element) {
    sort_children(root, "name");
    for node in root.children.iter_mut() {
        if let Some(child) = node.as_mut_element() {
            sort_children(child, "desc");
        }
    }
}

fn sort_children(element: &mut Element, attribute: &str) {
    element
        .children
        .sort_by_key(|node| sort_key(node, attribute));
}

fn sort_key(node: &XMLNode, attribute: &str) -> Option<(String, Option<String>)> {
    node.as_element()
        .map(|el| (el.name.clone(), el.attributes.get(attribute).cloned()))
}

fn text_element(name: &str, text: &str) -> Element {
    let mut element = Element::new(name);
    element.children.push(XMLNode::Text(text.to_string()));
    element
}
