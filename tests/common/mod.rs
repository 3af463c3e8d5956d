//! Fixture archives and images built in memory.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use flate2::Compression;
use flate2::write::DeflateEncoder;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

pub const CANDIDATES: [&str; 2] = ["thumbnails/Thumbnail.png", "Thumbnail.png"];

/// A `width`x`height` PNG with a diagonal gradient.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

pub fn deflate(payload: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload).unwrap();
    encoder.finish().unwrap()
}

pub struct Entry {
    pub name: Vec<u8>,
    pub data: Vec<u8>,
    pub uncompressed_len: u32,
    pub method: u16,
    pub extra: Vec<u8>,
    pub comment: Vec<u8>,
}

/// Layout of a built archive.
pub struct Built {
    pub bytes: Vec<u8>,
    /// Offset of each entry's local header, in insertion order.
    pub local_offsets: Vec<usize>,
    /// Offset just past each entry's payload.
    pub data_ends: Vec<usize>,
    pub cd_offset: usize,
    pub eocd_offset: usize,
}

#[derive(Default)]
pub struct ZipBuilder {
    entries: Vec<Entry>,
    comment: Vec<u8>,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(self, name: &str, payload: &[u8]) -> Self {
        self.entry(Entry {
            name: name.as_bytes().to_vec(),
            data: payload.to_vec(),
            uncompressed_len: payload.len() as u32,
            method: 0,
            extra: Vec::new(),
            comment: Vec::new(),
        })
    }

    pub fn deflated(self, name: &str, payload: &[u8]) -> Self {
        self.entry(Entry {
            name: name.as_bytes().to_vec(),
            data: deflate(payload),
            uncompressed_len: payload.len() as u32,
            method: 8,
            extra: Vec::new(),
            comment: Vec::new(),
        })
    }

    pub fn entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.build_layout().bytes
    }

    pub fn build_layout(&self) -> Built {
        let mut out = Vec::new();
        let mut cd = Vec::new();
        let mut local_offsets = Vec::new();
        let mut data_ends = Vec::new();

        for entry in &self.entries {
            let local_offset = out.len();
            local_offsets.push(local_offset);

            out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
            out.extend_from_slice(&20u16.to_le_bytes());
            out.extend_from_slice(&0u16.to_le_bytes());
            out.extend_from_slice(&entry.method.to_le_bytes());
            out.extend_from_slice(&[0; 8]);
            out.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
            out.extend_from_slice(&entry.uncompressed_len.to_le_bytes());
            out.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
            out.extend_from_slice(&(entry.extra.len() as u16).to_le_bytes());
            out.extend_from_slice(&entry.name);
            out.extend_from_slice(&entry.extra);
            out.extend_from_slice(&entry.data);
            data_ends.push(out.len());

            cd.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
            cd.extend_from_slice(&20u16.to_le_bytes());
            cd.extend_from_slice(&20u16.to_le_bytes());
            cd.extend_from_slice(&0u16.to_le_bytes());
            cd.extend_from_slice(&entry.method.to_le_bytes());
            cd.extend_from_slice(&[0; 8]);
            cd.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
            cd.extend_from_slice(&entry.uncompressed_len.to_le_bytes());
            cd.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
            cd.extend_from_slice(&(entry.extra.len() as u16).to_le_bytes());
            cd.extend_from_slice(&(entry.comment.len() as u16).to_le_bytes());
            cd.extend_from_slice(&[0; 8]);
            cd.extend_from_slice(&(local_offset as u32).to_le_bytes());
            cd.extend_from_slice(&entry.name);
            cd.extend_from_slice(&entry.extra);
            cd.extend_from_slice(&entry.comment);
        }

        let cd_offset = out.len();
        out.extend_from_slice(&cd);
        let eocd_offset = out.len();
        out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&(self.entries.len() as u16).to_le_bytes());
        out.extend_from_slice(&(self.entries.len() as u16).to_le_bytes());
        out.extend_from_slice(&(cd.len() as u32).to_le_bytes());
        out.extend_from_slice(&(cd_offset as u32).to_le_bytes());
        out.extend_from_slice(&(self.comment.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.comment);

        Built {
            bytes: out,
            local_offsets,
            data_ends,
            cd_offset,
            eocd_offset,
        }
    }
}
