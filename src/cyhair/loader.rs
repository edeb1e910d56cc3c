//! CyHair strand loader
//!
//! Reads the header and raw per-point arrays, derives the strand offset table
//! and hands out strands as owned, bounds-checked point sequences.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use glam::Vec3;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use super::error::{HairError, HairResult};
use super::header::{
    CyHairHeader, FLAG_COLOR, FLAG_POINTS, FLAG_SEGMENTS, FLAG_THICKNESS, FLAG_TRANSPARENCY,
};

/// One hair strand with its control points converted to Y-up
#[derive(Debug, Clone, PartialEq)]
pub struct Strand {
    pub index: usize,
    pub points: Vec<Vec3>,
    pub thickness: f32,
    pub transparency: f32,
    pub color: [f32; 3],
    pub point_thickness: Option<Vec<f32>>,
    pub point_transparency: Option<Vec<f32>>,
    pub point_color: Option<Vec<[f32; 3]>>,
}

impl Strand {
    pub fn num_segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Z-up file coordinates to Y-up
fn zup_to_yup(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, z, y)
}

/// A loaded CyHair file
#[derive(Debug, Clone)]
pub struct CyHairFile {
    header: CyHairHeader,
    segments: Option<Vec<u16>>,
    /// xyz per point, file coordinates
    points: Vec<f32>,
    thickness: Option<Vec<f32>>,
    transparency: Option<Vec<f32>>,
    /// rgb per point
    colors: Option<Vec<f32>>,
    strand_offsets: Vec<usize>,
}

/// Read exactly `count * width` bytes without trusting `count` for the
/// allocation; the buffer only grows as data actually arrives.
fn read_array_bytes<R: Read>(
    reader: &mut R,
    count: usize,
    width: usize,
    array: &'static str,
) -> HairResult<Vec<u8>> {
    let short = |detail: String| HairError::ShortRead {
        array,
        source: io::Error::new(io::ErrorKind::UnexpectedEof, detail),
    };
    let len = count
        .checked_mul(width)
        .ok_or_else(|| short(format!("{} entries overflow the address space", count)))?;

    let mut bytes = Vec::new();
    reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut bytes)
        .map_err(|source| HairError::ShortRead { array, source })?;
    if bytes.len() < len {
        return Err(short(format!("expected {} bytes, got {}", len, bytes.len())));
    }
    Ok(bytes)
}

fn read_f32_array<R: Read>(reader: &mut R, len: usize, array: &'static str) -> HairResult<Vec<f32>> {
    let bytes = read_array_bytes(reader, len, 4, array)?;
    let mut data = vec![0f32; len];
    LittleEndian::read_f32_into(&bytes, &mut data);
    Ok(data)
}

fn read_u16_array<R: Read>(reader: &mut R, len: usize, array: &'static str) -> HairResult<Vec<u16>> {
    let bytes = read_array_bytes(reader, len, 2, array)?;
    let mut data = vec![0u16; len];
    LittleEndian::read_u16_into(&bytes, &mut data);
    Ok(data)
}

impl CyHairFile {
    /// Load a CyHair file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> HairResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HairError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let hair = Self::from_reader(&mut BufReader::new(file))?;
        log::info!(
            "[CyHair] Loaded {}: {} strands, {} points",
            path.display(),
            hair.num_strands(),
            hair.total_points()
        );
        Ok(hair)
    }

    /// Parse CyHair data; all required arrays must be complete
    pub fn from_reader<R: Read>(reader: &mut R) -> HairResult<Self> {
        let header = CyHairHeader::read(reader)?;
        let num_strands = header.num_strands as usize;
        let total_points = header.total_points as usize;

        if !header.has_points() {
            return Err(HairError::MissingPoints);
        }
        if !header.has_segments() && header.default_segments < 1 {
            return Err(HairError::MissingSegments);
        }

        let segments = if header.has_segments() {
            Some(read_u16_array(reader, num_strands, "segments")?)
        } else {
            None
        };

        log::debug!("[CyHair] Has points.");
        let points = read_f32_array(reader, 3 * total_points, "points")?;

        let thickness = if header.has_thickness() {
            log::debug!("[CyHair] Has thickness.");
            Some(read_f32_array(reader, total_points, "thickness")?)
        } else {
            None
        };

        let transparency = if header.has_transparency() {
            log::debug!("[CyHair] Has transparency.");
            Some(read_f32_array(reader, total_points, "transparency")?)
        } else {
            None
        };

        let colors = if header.has_color() {
            log::debug!("[CyHair] Has color.");
            Some(read_f32_array(reader, 3 * total_points, "color")?)
        } else {
            None
        };

        let mut hair = Self {
            header,
            segments,
            points,
            thickness,
            transparency,
            colors,
            strand_offsets: Vec::new(),
        };
        hair.strand_offsets = hair.build_strand_offsets();
        Ok(hair)
    }

    /// Build a file from Y-up strands, all carrying the same thickness.
    /// Points are stored Z-up as the format expects.
    pub fn from_strands(strands: &[Vec<Vec3>], default_thickness: f32) -> Self {
        let total_points: usize = strands.iter().map(Vec::len).sum();
        let header = CyHairHeader {
            num_strands: strands.len() as u32,
            total_points: total_points as u32,
            flags: FLAG_SEGMENTS | FLAG_POINTS,
            default_thickness,
            ..Default::default()
        };
        let segments = strands
            .iter()
            .map(|s| s.len().saturating_sub(1) as u16)
            .collect();
        let points = strands
            .iter()
            .flatten()
            .flat_map(|p| [p.x, p.z, p.y])
            .collect();

        let mut hair = Self {
            header,
            segments: Some(segments),
            points,
            thickness: None,
            transparency: None,
            colors: None,
            strand_offsets: Vec::new(),
        };
        hair.strand_offsets = hair.build_strand_offsets();
        hair
    }

    /// Serialize back to the binary layout
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut header = self.header.clone();
        header.flags = FLAG_POINTS;
        if self.segments.is_some() {
            header.flags |= FLAG_SEGMENTS;
        }
        if self.thickness.is_some() {
            header.flags |= FLAG_THICKNESS;
        }
        if self.transparency.is_some() {
            header.flags |= FLAG_TRANSPARENCY;
        }
        if self.colors.is_some() {
            header.flags |= FLAG_COLOR;
        }
        header.write(writer)?;

        if let Some(segments) = &self.segments {
            for &s in segments {
                writer.write_u16::<LittleEndian>(s)?;
            }
        }
        let arrays = [
            Some(&self.points),
            self.thickness.as_ref(),
            self.transparency.as_ref(),
            self.colors.as_ref(),
        ];
        for array in arrays.into_iter().flatten() {
            for &f in array {
                writer.write_f32::<LittleEndian>(f)?;
            }
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write(&mut buffer);
        buffer
    }

    /// Prefix sum of `segments + 1` per strand.
    ///
    /// Stops after the first strand that starts past the point data, so a
    /// header claiming more strands than the file holds cannot grow the table
    /// beyond `total_points + 1` entries.
    fn build_strand_offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::new();
        let mut offset = 0usize;
        for i in 0..self.num_strands() {
            offsets.push(offset);
            if offset >= self.total_points() {
                break;
            }
            offset += self.strand_segments(i) + 1;
        }
        offsets
    }

    pub fn header(&self) -> &CyHairHeader {
        &self.header
    }

    pub fn num_strands(&self) -> usize {
        self.header.num_strands as usize
    }

    pub fn total_points(&self) -> usize {
        self.header.total_points as usize
    }

    pub fn default_thickness(&self) -> f32 {
        self.header.default_thickness
    }

    pub fn strand_offsets(&self) -> &[usize] {
        &self.strand_offsets
    }

    pub fn info_text(&self) -> String {
        self.header.info_text()
    }

    /// Segment count of strand `i`, falling back to the header default
    pub fn strand_segments(&self, i: usize) -> usize {
        match &self.segments {
            Some(segments) => segments[i] as usize,
            None => self.header.default_segments.max(0) as usize,
        }
    }

    /// Copy strand `i` out of the flat arrays
    pub fn strand(&self, i: usize) -> HairResult<Strand> {
        if i >= self.num_strands() {
            return Err(HairError::StrandOutOfRange {
                strand: i,
                start: self.total_points(),
                end: self.total_points(),
                total_points: self.total_points(),
            });
        }
        // Strands past the offset table start beyond the point data
        let start = match self.strand_offsets.get(i) {
            Some(&start) => start,
            None => self.strand_offsets.last().copied().unwrap_or(0).max(self.total_points()),
        };
        let end = start + self.strand_segments(i) + 1;
        if end > self.total_points() || 3 * end > self.points.len() {
            return Err(HairError::StrandOutOfRange {
                strand: i,
                start,
                end,
                total_points: self.total_points(),
            });
        }

        let points = self.points[3 * start..3 * end]
            .chunks_exact(3)
            .map(|p| zup_to_yup(p[0], p[1], p[2]))
            .collect();

        Ok(Strand {
            index: i,
            points,
            thickness: self.header.default_thickness,
            transparency: self.header.default_transparency,
            color: self.header.default_color,
            point_thickness: self.thickness.as_ref().map(|t| t[start..end].to_vec()),
            point_transparency: self.transparency.as_ref().map(|t| t[start..end].to_vec()),
            point_color: self.colors.as_ref().map(|c| {
                c[3 * start..3 * end]
                    .chunks_exact(3)
                    .map(|rgb| [rgb[0], rgb[1], rgb[2]])
                    .collect()
            }),
        })
    }

    /// The first `limit` strands (all when `None`), in file order
    pub fn strands(&self, limit: Option<usize>) -> HairResult<Vec<Strand>> {
        let count = limit.map_or(self.num_strands(), |n| n.min(self.num_strands()));
        (0..count).map(|i| self.strand(i)).collect()
    }
}
