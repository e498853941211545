use crate::RenderError;
use lopdf::{Document, ObjectId, Stream, dictionary};
use orcas_layout::RasterImage;

/// Writes an 8-bit RGB image XObject.
pub(crate) fn embed_image(
    doc: &mut Document,
    index: usize,
    image: &RasterImage,
) -> Result<ObjectId, RenderError> {
    let expected = image.width as usize * image.height as usize * 3;
    if image.rgb.len() != expected {
        return Err(RenderError::MalformedImage {
            index,
            expected,
            found: image.rgb.len(),
        });
    }
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.width as i64,
        "Height" => image.height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    Ok(doc.add_object(Stream::new(dict, image.rgb.clone())))
}
