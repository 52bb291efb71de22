//! In-memory OPC package

use std::io::{Read, Seek, Write};

use crate::error::{OpcError, OpcResult};
use crate::relationship::{parse_relationships, rels_path_for, Relationship};

pub const CONTENT_TYPES: &str = "[Content_Types].xml";

/// Every part of a package, kept in archive order
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: Vec<(String, Vec<u8>)>,
}

impl Package {
    /// Load every file of a ZIP archive into memory
    pub fn from_reader<R: Read + Seek>(reader: R) -> OpcResult<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            parts.push((name, data));
        }

        let package = Package { parts };
        if package.part(CONTENT_TYPES).is_none() {
            return Err(OpcError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }
        log::debug!("loaded package with {} parts", package.parts.len());
        Ok(package)
    }

    /// Bytes of a part, if present
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }

    /// Bytes of a part that must exist
    pub fn require(&self, name: &str) -> OpcResult<&[u8]> {
        self.part(name)
            .ok_or_else(|| OpcError::MissingPart(name.to_string()))
    }

    /// Replace a part, or append it if new
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = data,
            None => self.parts.push((name.to_string(), data)),
        }
    }

    /// Part names in archive order
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(n, _)| n.as_str())
    }

    /// Relationships owned by `part`; its `.rels` part must exist
    pub fn relationships(&self, part: &str) -> OpcResult<Vec<Relationship>> {
        parse_relationships(self.require(&rels_path_for(part))?)
    }

    /// Write every part to a new archive
    pub fn write<W: Write + Seek>(&self, writer: W) -> OpcResult<()> {
        let mut zip = zip::ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default();

        for (name, data) in &self.parts {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(data)?;
        }

        zip.finish()?;
        Ok(())
    }
}
