//! Text fragments as delivered by a text detector.
//!
//! Coordinates are image pixels with the origin in the top-left corner and y
//! growing downwards. Whatever the shape of a box, only its top-left vertex
//! (the "origin") takes part in ordering and distance computations.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    ops::{Deref, DerefMut},
    path::Path,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance.
    pub fn dist2(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Bounding geometry of a detected fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Geometry {
    /// Four vertices, clockwise from the top-left one.
    Polygon([Point; 4]),
    /// Axis-aligned rectangle.
    Rect { x: f32, y: f32, width: f32, height: f32 },
}

impl Geometry {
    /// A degenerate rectangle at `(x, y)`.
    pub const fn point(x: f32, y: f32) -> Self {
        Self::Rect { x, y, width: 0.0, height: 0.0 }
    }

    pub fn origin(&self) -> Point {
        match *self {
            Self::Polygon([first, ..]) => first,
            Self::Rect { x, y, .. } => Point::new(x, y),
        }
    }
}

impl From<Point> for Geometry {
    fn from(p: Point) -> Self {
        Self::point(p.x, p.y)
    }
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxText {
    #[serde(rename = "box")]
    pub bbox: Geometry,
    pub text: String,
    /// Number of copies; stack labels overwrite it.
    #[serde(default = "one")]
    pub n: u32,
}

impl BoxText {
    pub fn new(bbox: impl Into<Geometry>, text: impl Into<String>) -> Self {
        Self {
            bbox: bbox.into(),
            text: text.into(),
            n: 1,
        }
    }
}

/// Ordered fragments of one scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoxTextList(Vec<BoxText>);

impl BoxTextList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, bbox: impl Into<Geometry>, text: impl Into<String>) {
        self.0.push(BoxText::new(bbox, text));
    }

    pub fn push(&mut self, box_text: BoxText) {
        self.0.push(box_text);
    }

    /// Sort top-to-bottom, then left-to-right.
    ///
    /// The sort is stable, so boxes sharing an origin keep their detection order.
    pub fn sort(&mut self) {
        self.0.sort_by(|a, b| {
            let (a, b) = (a.bbox.origin(), b.bbox.origin());
            a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
        });
    }

    /// Sum of the copy counts.
    pub fn total(&self) -> u32 {
        self.0.iter().map(|v| v.n).sum()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Open box texts {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Parse box texts {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Create box texts {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).context("Serialize box texts")?;
        writer.flush().context("Flush box texts")
    }

    pub fn into_inner(self) -> Vec<BoxText> {
        self.0
    }
}

impl Deref for BoxTextList {
    type Target = [BoxText];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for BoxTextList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<BoxText>> for BoxTextList {
    fn from(v: Vec<BoxText>) -> Self {
        Self(v)
    }
}

impl FromIterator<BoxText> for BoxTextList {
    fn from_iter<I: IntoIterator<Item = BoxText>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for BoxTextList {
    type Item = BoxText;
    type IntoIter = std::vec::IntoIter<BoxText>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BoxTextList {
    type Item = &'a BoxText;
    type IntoIter = std::slice::Iter<'a, BoxText>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
