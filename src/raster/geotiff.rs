//! GeoTIFF emission for raster artifacts.
//!
//! Encodes the single f64 band with the GeoTIFF georeferencing tags
//! (ModelPixelScale, ModelTiepoint, GeoKeyDirectory) plus the GDAL nodata
//! convention tag, so downstream raster tooling picks up extent, resolution,
//! CRS, and NaN no-data without sidecar files.

use super::{RasterArtifact, RasterWriter};
use crate::error::{PipelineError, Result};
use std::fs::File;
use std::io::BufWriter;
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;
use tiff::TiffError;
use tracing::debug;

/// Writes raster artifacts as tagged geographic TIFF files.
///
/// Files are opened in create/overwrite mode; the handle is dropped on every
/// exit path.
#[derive(Debug, Default)]
pub struct GeoTiffWriter;

impl GeoTiffWriter {
    pub fn new() -> Self {
        Self
    }

    fn encode(&self, artifact: &RasterArtifact, file: File) -> std::result::Result<(), TiffError> {
        let (rows, cols) = artifact.dim();
        let transform = &artifact.transform;

        let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
        let mut image = encoder.new_image::<colortype::Gray64Float>(cols as u32, rows as u32)?;

        // Pixel size; the third component is the (unused) vertical scale.
        let scale = [
            transform.pixel_width,
            transform.pixel_height.abs(),
            0.0_f64,
        ];
        image
            .encoder()
            .write_tag(Tag::ModelPixelScaleTag, &scale[..])?;

        // Tie raster corner (0, 0) to the grid's north-west corner.
        let tiepoint = [
            0.0,
            0.0,
            0.0,
            transform.origin_longitude,
            transform.origin_latitude,
            0.0_f64,
        ];
        image
            .encoder()
            .write_tag(Tag::ModelTiepointTag, &tiepoint[..])?;

        // GeoKey directory header (version 1.1.0, 4 keys) followed by:
        //   GTModelType      = geographic
        //   GTRasterType     = pixel-is-area
        //   GeographicType   = EPSG code of the artifact CRS
        //   GeogAngularUnits = degrees
        let geo_keys: [u16; 20] = [
            1, 1, 0, 4, //
            1024, 0, 1, 2, //
            1025, 0, 1, 1, //
            2048, 0, 1, artifact.crs.epsg, //
            2054, 0, 1, 9102, //
        ];
        image
            .encoder()
            .write_tag(Tag::GeoKeyDirectoryTag, &geo_keys[..])?;

        image.encoder().write_tag(Tag::GdalNodata, "nan")?;

        let band: Vec<f64> = artifact.values.iter().copied().collect();
        image.write_data(&band)?;

        Ok(())
    }
}

impl RasterWriter for GeoTiffWriter {
    fn write(&self, artifact: &RasterArtifact) -> Result<()> {
        let file = File::create(&artifact.path)?;
        self.encode(artifact, file)
            .map_err(|source| PipelineError::Raster {
                path: artifact.path.clone(),
                source,
            })?;

        let (rows, cols) = artifact.dim();
        debug!(
            "wrote {}x{} raster to {}",
            rows,
            cols,
            artifact.path.display()
        );
        Ok(())
    }
}
