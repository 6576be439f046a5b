mod block;
mod galois;
mod poly;

use std::ops::Deref;

use block::Block;

use super::{
    error::QRResult,
    metadata::{ECLevel, Version},
};

// Error correction & interleaving
//------------------------------------------------------------------------------

/// Splits data codewords into blocks and appends ecc to each.
pub(crate) fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<Vec<Block>> {
    blockify(data, version, ec_level)
        .into_iter()
        .zip(version.rs_blocks(ec_level))
        .map(|(raw, rsb)| Block::new(raw, rsb.ec_count()))
        .collect()
}

/// Assigns data codewords to blocks in table order.
pub(crate) fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let rs_blocks = version.rs_blocks(ec_level);
    let total_size = rs_blocks.iter().map(|b| b.data_count).sum::<usize>();

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut offset = 0;
    rs_blocks
        .iter()
        .map(|b| {
            let block = &data[offset..offset + b.data_count];
            offset += b.data_count;
            block
        })
        .collect()
}

/// Column major read out. Shorter blocks are skipped once exhausted.
pub(crate) fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

/// Final codeword sequence: interleaved data followed by interleaved ecc.
pub(crate) fn codewords(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<Vec<u8>> {
    let blocks = ecc(data, version, ec_level)?;
    let data_blocks = blocks.iter().map(Block::data).collect::<Vec<_>>();
    let ecc_blocks = blocks.iter().map(Block::ecc).collect::<Vec<_>>();

    let mut res = interleave(&data_blocks);
    res.extend(interleave(&ecc_blocks));
    debug_assert_eq!(res.len(), version.total_codewords());
    Ok(res)
}
