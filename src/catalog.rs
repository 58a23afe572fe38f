use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::naming::sanitize;

#[derive(Debug, PartialEq, Deserialize)]
pub struct ClassRecord {
    #[serde(rename = "classId")]
    pub class_id: String,
    pub title: String,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct LectureRecord {
    pub sn: u32,
    #[serde(rename = "lectureId")]
    pub lecture_id: String,
    pub title: String,
}

/// Read-only view of the metadata repository: a class index document plus
/// one lecture list document per class id.
pub struct Catalog {
    json_dir: PathBuf,
}

impl Catalog {
    pub fn new(repo_dir: &Path) -> Self {
        Self {
            json_dir: repo_dir.join("json"),
        }
    }

    pub fn classes(&self) -> Result<Vec<ClassRecord>> {
        read_records(&self.json_dir.join("myclasses.json"))
    }

    /// Where the lecture list for a class lives. Callers check existence
    /// before loading; a class without its document is skipped, not an error.
    pub fn lectures_path(&self, class_id: &str) -> PathBuf {
        self.json_dir.join("classes").join(format!("{class_id}.json"))
    }

    pub fn lectures(&self, class_id: &str) -> Result<Vec<LectureRecord>> {
        read_records(&self.lectures_path(class_id))
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let data =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn class_by_id<'a>(classes: &'a [ClassRecord], class_id: &str) -> Option<&'a ClassRecord> {
    classes.iter().find(|class| class.class_id == class_id)
}

pub fn lecture_by_sn(lectures: &[LectureRecord], sn: u32) -> Option<&LectureRecord> {
    lectures.iter().find(|lecture| lecture.sn == sn)
}

/// Resolve a class id from a title-scheme directory name. Titles compare by
/// their sanitized forms; first match wins.
pub fn class_id_by_title<'a>(classes: &'a [ClassRecord], title: &str) -> Option<&'a str> {
    let wanted = sanitize(title);
    classes
        .iter()
        .find(|class| sanitize(&class.title) == wanted)
        .map(|class| class.class_id.as_str())
}

/// Resolve a lecture id from a title-scheme filename. Both the sequence
/// number and the sanitized title must match; first match wins.
pub fn lecture_id_by_title_and_sn<'a>(
    lectures: &'a [LectureRecord],
    title: &str,
    sn: u32,
) -> Option<&'a str> {
    let wanted = sanitize(title);
    lectures
        .iter()
        .find(|lecture| lecture.sn == sn && sanitize(&lecture.title) == wanted)
        .map(|lecture| lecture.lecture_id.as_str())
}
