//! # WAD container
//!
//! * Reads the whole file into RAM.
//! * Zero-copy access to individual lumps.
//! * Decodes binary lumps into typed vectors with **bincode 2**.
//!
//! Both `IWAD` and `PWAD` headers are accepted; the map viewer only ever
//! reads from a single file.

use bincode::{Decode, config, decode_from_slice};
use byteorder::{LittleEndian as LE, ReadBytesExt};
use std::{collections::HashMap, fs, io, mem, path::Path};
use thiserror::Error;

/// Bytes per directory entry.
const DIR_ENTRY_SIZE: usize = 16;
/// Bytes in the file header.
const HEADER_SIZE: usize = 12;

/// One entry in the lump directory.
#[derive(Clone, Debug)]
pub struct LumpInfo {
    pub name: [u8; 8],
    pub offset: u32,
    pub size: u32,
}

/// Entire WAD in memory (raw bytes + parsed directory).
#[derive(Debug)]
pub struct Wad {
    lumps: Vec<LumpInfo>,
    bytes: Vec<u8>,
    by_name: HashMap<String, usize>,
}

#[derive(Error, Debug)]
pub enum WadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("file is not an IWAD or PWAD")]
    BadMagic,

    #[error("directory extends beyond end of file")]
    DirectoryOutOfBounds,

    #[error("lump index {0} out of range")]
    BadIndex(usize),

    #[error("lump {name} (# {index}) slice {offset}+{size} past EOF ({file_size})")]
    BadOffset {
        index: usize,
        name: String,
        offset: u32,
        size: u32,
        file_size: usize,
    },

    #[error("lump {name} (# {index}) size {size} not multiple of element {elem_size}")]
    BadLumpSize {
        index: usize,
        name: String,
        size: usize,
        elem_size: usize,
    },

    #[error("lump {name} (# {index}) element {elem}: {source}")]
    BadElement {
        index: usize,
        name: String,
        elem: usize,
        source: bincode::error::DecodeError,
    },
}

impl Wad {
    /*──────────────────────── loading ─────────────────────────────*/

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WadError> {
        Self::from_bytes(fs::read(path)?)
    }

    /// Parse an in-memory image.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, WadError> {
        let mut header = bytes.get(..HEADER_SIZE).ok_or(WadError::BadMagic)?;

        let mut magic = [0u8; 4];
        io::Read::read_exact(&mut header, &mut magic)?;
        if &magic != b"IWAD" && &magic != b"PWAD" {
            return Err(WadError::BadMagic);
        }
        let num_lumps = header.read_u32::<LE>()? as usize;
        let dir_offset = header.read_u32::<LE>()? as usize;

        let dir_end = dir_offset + num_lumps * DIR_ENTRY_SIZE;
        if dir_end > bytes.len() {
            return Err(WadError::DirectoryOutOfBounds);
        }

        let mut lumps = Vec::with_capacity(num_lumps);
        let mut cur = &bytes[dir_offset..dir_end];
        for _ in 0..num_lumps {
            let offset = cur.read_u32::<LE>()?;
            let size = cur.read_u32::<LE>()?;
            let mut name = [0u8; 8];
            io::Read::read_exact(&mut cur, &mut name)?;
            lumps.push(LumpInfo { name, offset, size });
        }

        for (i, l) in lumps.iter().enumerate() {
            if l.offset as usize + l.size as usize > bytes.len() {
                return Err(WadError::BadOffset {
                    index: i,
                    name: Self::lump_name_str(&l.name).into(),
                    offset: l.offset,
                    size: l.size,
                    file_size: bytes.len(),
                });
            }
        }

        // later lumps shadow earlier ones
        let mut by_name = HashMap::with_capacity(lumps.len());
        for (i, l) in lumps.iter().enumerate().rev() {
            by_name
                .entry(Self::lump_name_str(&l.name).to_owned())
                .or_insert(i);
        }

        Ok(Self {
            lumps,
            bytes,
            by_name,
        })
    }

    /*──────────────────────── lookup ──────────────────────────────*/

    pub fn lumps(&self) -> &[LumpInfo] {
        &self.lumps
    }

    /// `&str` view of an 8-byte lump name, trimmed at the first NUL.
    pub fn lump_name_str(name: &[u8; 8]) -> &str {
        let end = name.iter().position(|&b| b == 0).unwrap_or(name.len());
        std::str::from_utf8(&name[..end]).unwrap_or("?")
    }

    pub fn lump_bytes(&self, idx: usize) -> Result<&[u8], WadError> {
        let l = self.lumps.get(idx).ok_or(WadError::BadIndex(idx))?;
        let start = l.offset as usize;
        let end = start + l.size as usize;
        self.bytes.get(start..end).ok_or_else(|| WadError::BadOffset {
            index: idx,
            name: Self::lump_name_str(&l.name).into(),
            offset: l.offset,
            size: l.size,
            file_size: self.bytes.len(),
        })
    }

    /// Last lump called `name` (case-sensitive).
    pub fn find_lump(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Bytes of the last lump called `name`.
    pub fn lump_by_name(&self, name: &str) -> Option<&[u8]> {
        self.lump_bytes(self.find_lump(name)?).ok()
    }

    /*──────────────────────── decoding ────────────────────────────*/

    /// Decode a lump of fixed-size little-endian records.
    pub fn lump_to_vec<T>(&self, idx: usize) -> Result<Vec<T>, WadError>
    where
        T: Decode<()>,
    {
        let bytes = self.lump_bytes(idx)?;
        let elem = mem::size_of::<T>();
        let name = || Self::lump_name_str(&self.lumps[idx].name).to_owned();

        if elem == 0 || bytes.len() % elem != 0 {
            return Err(WadError::BadLumpSize {
                index: idx,
                name: name(),
                size: bytes.len(),
                elem_size: elem,
            });
        }

        let cfg = config::standard()
            .with_fixed_int_encoding()
            .with_little_endian();
        let mut out = Vec::with_capacity(bytes.len() / elem);
        let mut slice = bytes;

        while !slice.is_empty() {
            let (val, read) =
                decode_from_slice::<T, _>(slice, cfg).map_err(|e| WadError::BadElement {
                    index: idx,
                    name: name(),
                    elem: out.len(),
                    source: e,
                })?;
            out.push(val);
            slice = &slice[read..];
        }
        Ok(out)
    }
}

/*──────────────────────────── test builder ─────────────────────────*/

/// Assemble a PWAD image from `(name, data)` pairs, in order.
#[cfg(test)]
pub(crate) fn build_wad(lumps: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let data_len: usize = lumps.iter().map(|(_, d)| d.len()).sum();
    let dir_offset = HEADER_SIZE + data_len;

    let mut out = Vec::with_capacity(dir_offset + lumps.len() * DIR_ENTRY_SIZE);
    out.extend_from_slice(b"PWAD");
    out.extend(&(lumps.len() as u32).to_le_bytes());
    out.extend(&(dir_offset as u32).to_le_bytes());

    let mut offsets = Vec::with_capacity(lumps.len());
    for (_, data) in lumps {
        offsets.push(out.len() as u32);
        out.extend_from_slice(data);
    }
    for ((name, data), off) in lumps.iter().zip(offsets) {
        out.extend(&off.to_le_bytes());
        out.extend(&(data.len() as u32).to_le_bytes());
        let mut raw = [0u8; 8];
        raw[..name.len()].copy_from_slice(name.as_bytes());
        out.extend(&raw);
    }
    out
}
