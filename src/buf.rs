use crate::{DecodeError, DecodeErrorKind, DecodeResult};

/// A cursor over a shared `Bytes` buffer that refuses to read past its end.
pub(crate) struct BytesRef<'a> {
    b: &'a bytes::Bytes,
    data: &'a [u8],
}

impl<'a> BytesRef<'a> {
    pub(crate) fn new(b: &'a bytes::Bytes) -> Self {
        BytesRef { b, data: b }
    }

    pub(crate) fn read(&mut self, amt: usize) -> DecodeResult<&'a [u8]> {
        if amt > self.len() {
            return Err(DecodeError::new(DecodeErrorKind::InsufficientData {
                needed: amt,
                available: self.len(),
            }));
        }
        let (result, data) = self.data.split_at(amt);
        self.data = data;
        Ok(result)
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read(N)?);
        Ok(out)
    }

    pub(crate) fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read(1)?[0])
    }

    pub(crate) fn read_i8(&mut self) -> DecodeResult<i8> {
        Ok(i8::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_i16(&mut self) -> DecodeResult<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_i32(&mut self) -> DecodeResult<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_i64(&mut self) -> DecodeResult<i64> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_f64(&mut self) -> DecodeResult<f64> {
        Ok(f64::from_bits(u64::from_be_bytes(self.read_array()?)))
    }

    /// Reads `amt` bytes as a zero-copy `Bytes` slice of the underlying buffer.
    pub(crate) fn read_bytes(&mut self, amt: usize) -> DecodeResult<bytes::Bytes> {
        let slice = self.read(amt)?;
        Ok(self.b.slice_ref(slice))
    }
}

impl std::ops::Deref for BytesRef<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.data
    }
}
