use jpeg_decoder::{Decoder, PixelFormat};
use lopdf::{Dictionary, Object, Stream};

use crate::core::InvoiceError;

/// Largest image accepted for embedding.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// A JPEG ready to be embedded as a DCT-encoded image XObject.
#[derive(Debug, Clone)]
pub struct JpegImage {
    pub width: u16,
    pub height: u16,
    color_space: &'static [u8],
    cmyk: bool,
    data: Vec<u8>,
}

impl JpegImage {
    /// Read the JPEG header. The pixel data is embedded as is, not decoded.
    pub fn decode(data: Vec<u8>) -> Result<Self, InvoiceError> {
        if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
            return Err(InvoiceError::Image(
                "only JPEG images are supported (missing SOI marker)".into(),
            ));
        }
        if data.len() > MAX_IMAGE_BYTES {
            return Err(InvoiceError::Image(format!(
                "image too large ({} bytes, max {MAX_IMAGE_BYTES})",
                data.len()
            )));
        }

        let mut decoder = Decoder::new(&data[..]);
        decoder
            .read_info()
            .map_err(|e| InvoiceError::Image(format!("failed to read JPEG header: {e}")))?;
        let info = decoder
            .info()
            .ok_or_else(|| InvoiceError::Image("JPEG header carries no image info".into()))?;

        let (color_space, cmyk): (&'static [u8], bool) = match info.pixel_format {
            PixelFormat::L8 => (b"DeviceGray", false),
            PixelFormat::RGB24 => (b"DeviceRGB", false),
            PixelFormat::CMYK32 => (b"DeviceCMYK", true),
            other => {
                return Err(InvoiceError::Image(format!(
                    "unsupported JPEG pixel format {other:?}"
                )));
            }
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            color_space,
            cmyk,
            data,
        })
    }

    /// Height on the page when drawn `width` points wide.
    pub fn scaled_height(&self, width: f32) -> f32 {
        if self.width == 0 {
            return 0.0;
        }
        width * f32::from(self.height) / f32::from(self.width)
    }

    pub fn into_stream(self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(i64::from(self.width)));
        dict.set("Height", Object::Integer(i64::from(self.height)));
        dict.set("ColorSpace", Object::Name(self.color_space.to_vec()));
        dict.set("BitsPerComponent", Object::Integer(8));
        if self.cmyk {
            // Adobe CMYK JPEGs are stored inverted
            dict.set(
                "Decode",
                Object::Array(
                    [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]
                        .into_iter()
                        .map(Object::Real)
                        .collect(),
                ),
            );
        }
        dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
        // DCT data must not be recompressed
        Stream::new(dict, self.data).with_compression(false)
    }
}
