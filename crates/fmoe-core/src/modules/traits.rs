use super::serialization::{SvlEncoder, SvlResult};

/// A finished record that knows its positional SVL field order.
pub trait SvlEncode {
    fn encode_svl(&self, encoder: &mut SvlEncoder) -> SvlResult<()>;

    fn to_svl_bytes(&self) -> SvlResult<Vec<u8>> {
        let mut encoder = SvlEncoder::new();
        self.encode_svl(&mut encoder)?;
        Ok(encoder.into_bytes())
    }
}
