use crate::error::RuntimeDataError;
use std::sync::Arc;
use xbfload_core::{Constant, PropertyIndex, PropertySetter, SetterValue, TypeIndex};

/// Little-endian cursor over one custom runtime data record.
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], RuntimeDataError> {
        let bytes = self.take_slice(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    fn take_slice(&mut self, len: usize) -> Result<&'a [u8], RuntimeDataError> {
        let remaining = self.data.len() - self.position;
        if remaining < len {
            return Err(RuntimeDataError::UnexpectedEnd { offset: self.position, needed: len - remaining });
        }
        let slice = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, RuntimeDataError> {
        Ok(self.take::<1>()?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool, RuntimeDataError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16, RuntimeDataError> {
        self.take().map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, RuntimeDataError> {
        self.take().map(u32::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> Result<i32, RuntimeDataError> {
        self.take().map(i32::from_le_bytes)
    }

    pub fn read_f64(&mut self) -> Result<f64, RuntimeDataError> {
        self.take().map(f64::from_le_bytes)
    }

    /// Element count prefix. Counts larger than the remaining input are
    /// rejected before anything is allocated.
    pub fn read_count(&mut self) -> Result<usize, RuntimeDataError> {
        let count = self.read_u32()? as usize;
        let remaining = self.data.len() - self.position;
        if count > remaining {
            return Err(RuntimeDataError::UnexpectedEnd { offset: self.position, needed: count - remaining });
        }
        Ok(count)
    }

    /// `u32` code-unit count followed by UTF-16LE code units.
    pub fn read_string(&mut self) -> Result<Arc<str>, RuntimeDataError> {
        let start = self.position;
        let units = self.read_u32()? as usize;
        let bytes = self.take_slice(units.saturating_mul(2))?;
        let units = bytes.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
        char::decode_utf16(units)
            .collect::<Result<String, _>>()
            .map(Arc::from)
            .map_err(|_| RuntimeDataError::InvalidUtf16 { offset: start })
    }

    /// A string where the empty string stands for "absent".
    pub fn read_optional_string(&mut self) -> Result<Option<Arc<str>>, RuntimeDataError> {
        let text = self.read_string()?;
        Ok((!text.is_empty()).then_some(text))
    }

    pub fn read_type(&mut self) -> Result<TypeIndex, RuntimeDataError> {
        self.read_u16().map(TypeIndex)
    }

    pub fn read_setter_value(&mut self) -> Result<SetterValue, RuntimeDataError> {
        let offset = self.position;
        let tag = self.read_u8()?;
        Ok(match tag {
            0 => SetterValue::Constant(Constant::Null),
            1 => SetterValue::Constant(Constant::Bool(self.read_bool()?)),
            2 => SetterValue::Constant(Constant::Int32(self.read_i32()?)),
            3 => SetterValue::Constant(Constant::Double(self.read_f64()?)),
            4 => SetterValue::Constant(Constant::String(self.read_string()?)),
            5 => SetterValue::StaticResource(self.read_string()?),
            6 => SetterValue::ThemeResource(self.read_string()?),
            tag => return Err(RuntimeDataError::InvalidSetterTag { tag, offset }),
        })
    }

    pub fn read_setters(&mut self) -> Result<Vec<PropertySetter>, RuntimeDataError> {
        let count = self.read_count()?;
        (0..count)
            .map(|_| {
                let property = PropertyIndex(self.read_u16()?);
                let value = self.read_setter_value()?;
                Ok(PropertySetter { property, value })
            })
            .collect()
    }

    /// Fails unless every byte of the record has been consumed.
    pub fn finish(self) -> Result<(), RuntimeDataError> {
        match self.data.len() - self.position {
            0 => Ok(()),
            count => Err(RuntimeDataError::TrailingBytes { count }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn utf16(text: &str) -> Vec<u8> {
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut bytes = (units.len() as u32).to_le_bytes().to_vec();
        bytes.extend(units.iter().flat_map(|unit| unit.to_le_bytes()));
        bytes
    }

    #[rstest]
    fn strings_are_counted_in_code_units() {
        let bytes = utf16("Grüße 🎉");
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(&*reader.read_string().unwrap(), "Grüße 🎉");
        reader.finish().unwrap();
    }

    #[rstest]
    fn lone_surrogates_are_rejected() {
        let mut bytes = 1u32.to_le_bytes().to_vec();
        bytes.extend(0xD800u16.to_le_bytes());
        assert_eq!(
            ByteReader::new(&bytes).read_string(),
            Err(RuntimeDataError::InvalidUtf16 { offset: 0 })
        );
    }

    #[rstest]
    #[case::u16(&[0x01], 1)]
    #[case::empty(&[], 2)]
    fn truncation_reports_missing_bytes(#[case] bytes: &[u8], #[case] needed: usize) {
        assert_eq!(
            ByteReader::new(bytes).read_u16(),
            Err(RuntimeDataError::UnexpectedEnd { offset: 0, needed })
        );
    }

    #[rstest]
    fn oversized_counts_fail_before_allocating() {
        let bytes = u32::MAX.to_le_bytes();
        assert!(matches!(
            ByteReader::new(&bytes).read_count(),
            Err(RuntimeDataError::UnexpectedEnd { offset: 4, .. })
        ));
    }

    #[rstest]
    #[case::null(vec![0], SetterValue::Constant(Constant::Null))]
    #[case::bool(vec![1, 1], SetterValue::Constant(Constant::Bool(true)))]
    #[case::int(vec![2, 0xFE, 0xFF, 0xFF, 0xFF], SetterValue::Constant(Constant::Int32(-2)))]
    #[case::static_key([vec![5], utf16("Accent")].concat(), SetterValue::StaticResource("Accent".into()))]
    #[case::theme_key([vec![6], utf16("Fg")].concat(), SetterValue::ThemeResource("Fg".into()))]
    fn setter_values_decode_by_tag(#[case] bytes: Vec<u8>, #[case] expected: SetterValue) {
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_setter_value().unwrap(), expected);
        reader.finish().unwrap();
    }

    #[rstest]
    fn unknown_setter_tags_are_rejected() {
        assert_eq!(
            ByteReader::new(&[9]).read_setter_value(),
            Err(RuntimeDataError::InvalidSetterTag { tag: 9, offset: 0 })
        );
    }

    #[rstest]
    fn trailing_bytes_are_reported() {
        let mut reader = ByteReader::new(&[1, 2, 3]);
        reader.read_u8().unwrap();
        assert_eq!(reader.finish(), Err(RuntimeDataError::TrailingBytes { count: 2 }));
    }
}
