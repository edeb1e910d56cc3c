//! CyHair file header
//!
//! Layout (128 bytes, little-endian):
//! magic "HAIR" (4) | num_strands u32 | total_points u32 | flags u32 |
//! default_segments i32 | default_thickness f32 | default_transparency f32 |
//! default_color 3 x f32 | information text (88)

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use super::error::{HairError, HairResult};

pub const HEADER_SIZE: usize = 128;
pub const INFO_SIZE: usize = 88;
pub const MAGIC: [u8; 4] = *b"HAIR";

/// Per-strand segment counts follow the header
pub const FLAG_SEGMENTS: u32 = 0x1;
pub const FLAG_POINTS: u32 = 0x2;
pub const FLAG_THICKNESS: u32 = 0x4;
pub const FLAG_TRANSPARENCY: u32 = 0x8;
pub const FLAG_COLOR: u32 = 0x10;

#[derive(Debug, Clone, PartialEq)]
pub struct CyHairHeader {
    pub num_strands: u32,
    pub total_points: u32,
    pub flags: u32,
    /// Segments per strand when the segments array is absent
    pub default_segments: i32,
    pub default_thickness: f32,
    pub default_transparency: f32,
    pub default_color: [f32; 3],
    pub info: [u8; INFO_SIZE],
}

impl Default for CyHairHeader {
    fn default() -> Self {
        Self {
            num_strands: 0,
            total_points: 0,
            flags: FLAG_POINTS,
            default_segments: -1,
            default_thickness: 0.01,
            default_transparency: 1.0,
            default_color: [0.5; 3],
            info: [0; INFO_SIZE],
        }
    }
}

impl CyHairHeader {
    /// Read and validate the 128-byte header
    pub fn read<R: Read>(reader: &mut R) -> HairResult<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        reader
            .read_exact(&mut bytes)
            .map_err(HairError::TruncatedHeader)?;
        Self::parse(&bytes)
    }

    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> HairResult<Self> {
        let mut found = [0u8; 4];
        found.copy_from_slice(&bytes[0..4]);
        if found != MAGIC {
            return Err(HairError::BadMagic { found });
        }

        Self::read_fields(&mut &bytes[4..]).map_err(HairError::TruncatedHeader)
    }

    fn read_fields<R: Read>(reader: &mut R) -> io::Result<Self> {
        let num_strands = reader.read_u32::<LittleEndian>()?;
        let total_points = reader.read_u32::<LittleEndian>()?;
        let flags = reader.read_u32::<LittleEndian>()?;
        let default_segments = reader.read_i32::<LittleEndian>()?;
        let default_thickness = reader.read_f32::<LittleEndian>()?;
        let default_transparency = reader.read_f32::<LittleEndian>()?;
        let mut default_color = [0f32; 3];
        reader.read_f32_into::<LittleEndian>(&mut default_color)?;
        let mut info = [0u8; INFO_SIZE];
        reader.read_exact(&mut info)?;
        Ok(Self {
            num_strands,
            total_points,
            flags,
            default_segments,
            default_thickness,
            default_transparency,
            default_color,
            info,
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&MAGIC)?;
        writer.write_u32::<LittleEndian>(self.num_strands)?;
        writer.write_u32::<LittleEndian>(self.total_points)?;
        writer.write_u32::<LittleEndian>(self.flags)?;
        writer.write_i32::<LittleEndian>(self.default_segments)?;
        writer.write_f32::<LittleEndian>(self.default_thickness)?;
        writer.write_f32::<LittleEndian>(self.default_transparency)?;
        for &c in &self.default_color {
            writer.write_f32::<LittleEndian>(c)?;
        }
        writer.write_all(&self.info)
    }

    pub fn has_segments(&self) -> bool {
        self.flags & FLAG_SEGMENTS != 0
    }

    pub fn has_points(&self) -> bool {
        self.flags & FLAG_POINTS != 0
    }

    pub fn has_thickness(&self) -> bool {
        self.flags & FLAG_THICKNESS != 0
    }

    pub fn has_transparency(&self) -> bool {
        self.flags & FLAG_TRANSPARENCY != 0
    }

    pub fn has_color(&self) -> bool {
        self.flags & FLAG_COLOR != 0
    }

    /// Information text up to the first NUL
    pub fn info_text(&self) -> String {
        let end = self.info.iter().position(|&b| b == 0).unwrap_or(INFO_SIZE);
        String::from_utf8_lossy(&self.info[..end]).trim().to_string()
    }

    /// Store `text` in the information field, truncated to fit
    pub fn set_info_text(&mut self, text: &str) {
        self.info = [0; INFO_SIZE];
        let n = text.len().min(INFO_SIZE);
        self.info[..n].copy_from_slice(&text.as_bytes()[..n]);
    }
}
