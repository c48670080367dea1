//! In-memory PNG chunk stream

use crate::{
    chunk::{self, Chunk, ChunkType},
    error::{Error, Result},
    options::{CrcPolicy, MAX_CHUNK_SIZE},
};

/// A fully buffered PNG as an ordered list of chunks
///
/// Construction via [`PngImage::parse`] guarantees the list starts with
/// exactly one `IHDR` and ends with exactly one `IEND`. Mutations keep both in
/// place: nothing can be inserted before `IHDR` or after `IEND`, and neither
/// can be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage {
    chunks: Vec<Chunk>,
}

impl PngImage {
    /// Parse with strict CRC checking and the format's chunk length limit
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::parse_with(bytes, MAX_CHUNK_SIZE, CrcPolicy::Strict)
    }

    /// Parse with an explicit chunk length limit and CRC policy
    pub fn parse_with(bytes: &[u8], max_chunk_size: u32, crc_policy: CrcPolicy) -> Result<Self> {
        let chunks = chunk::decode_all(bytes, max_chunk_size, crc_policy)?;
        Self::validate_structure(&chunks)?;

        tracing::debug!(chunks = chunks.len(), bytes = bytes.len(), "parsed PNG");
        Ok(Self { chunks })
    }

    fn validate_structure(chunks: &[Chunk]) -> Result<()> {
        let (Some(first), Some(last)) = (chunks.first(), chunks.last()) else {
            return Err(Error::InvalidPngStructure("PNG contains no chunks".into()));
        };

        if first.chunk_type != ChunkType::IHDR {
            return Err(Error::InvalidPngStructure(format!(
                "first chunk is {}, expected IHDR",
                first.chunk_type
            )));
        }

        if last.chunk_type != ChunkType::IEND {
            return Err(Error::InvalidPngStructure(format!(
                "last chunk is {}, expected IEND",
                last.chunk_type
            )));
        }

        let count = |ty: ChunkType| chunks.iter().filter(|c| c.chunk_type == ty).count();

        let ihdr_count = count(ChunkType::IHDR);
        if ihdr_count != 1 {
            return Err(Error::InvalidPngStructure(format!(
                "expected exactly one IHDR chunk, found {}",
                ihdr_count
            )));
        }

        let iend_count = count(ChunkType::IEND);
        if iend_count != 1 {
            return Err(Error::InvalidPngStructure(format!(
                "expected exactly one IEND chunk, found {}",
                iend_count
            )));
        }

        Ok(())
    }

    /// Serialize back to bytes, recomputing every CRC
    pub fn serialize(&self) -> Result<Vec<u8>> {
        chunk::encode_all(&self.chunks)
    }

    /// All chunks in file order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunk type tags in file order
    pub fn chunk_types(&self) -> Vec<ChunkType> {
        self.chunks.iter().map(|c| c.chunk_type).collect()
    }

    /// The IHDR chunk (always the first chunk)
    pub fn header(&self) -> &Chunk {
        &self.chunks[0]
    }

    /// Indices of every chunk with the given type, in file order
    pub fn find_chunks(&self, chunk_type: ChunkType) -> Vec<usize> {
        self.chunks
            .iter()
            .enumerate()
            .filter(|(_, c)| c.chunk_type == chunk_type)
            .map(|(index, _)| index)
            .collect()
    }

    /// The first chunk with the given type, if any
    pub fn first_chunk(&self, chunk_type: ChunkType) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.chunk_type == chunk_type)
    }

    /// Remove every chunk with the given type, returning how many were removed
    ///
    /// Removing an absent type is a no-op. `IHDR` and `IEND` are never removed.
    pub fn remove_chunks(&mut self, chunk_type: ChunkType) -> usize {
        if chunk_type == ChunkType::IHDR || chunk_type == ChunkType::IEND {
            return 0;
        }

        let before = self.chunks.len();
        self.chunks.retain(|c| c.chunk_type != chunk_type);
        before - self.chunks.len()
    }

    /// Insert `chunk` before the first chunk whose type satisfies `predicate`
    ///
    /// Falls back to just before `IEND` when nothing matches. The search starts
    /// after `IHDR`, so the new chunk always lands between `IHDR` and `IEND`.
    /// Returns the index the chunk was inserted at.
    pub fn insert_chunk_before_first<F>(&mut self, predicate: F, chunk: Chunk) -> usize
    where
        F: Fn(&ChunkType) -> bool,
    {
        let iend = self.chunks.len() - 1;
        let index = self.chunks[1..iend]
            .iter()
            .position(|c| predicate(&c.chunk_type))
            .map(|pos| pos + 1)
            .unwrap_or(iend);

        tracing::debug!(chunk_type = %chunk.chunk_type, index, "inserting chunk");
        self.chunks.insert(index, chunk);
        index
    }
}
