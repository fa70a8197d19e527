use log::debug;

use crate::{
    alignment::Alignment, command::encode, error::Error, model::Model,
    raster::rasterize_with_width,
};

/// Conversion settings.
///
/// Starts from the model, everything else has a default and is changed with
/// the consuming setters.
///
/// # Example
///
/// ```
/// use escpos_image::{Alignment, Config, Model};
///
/// let config = Config::new(Model::Paper58mm)
///     .alignment(Alignment::Center)
///     .scale_to_width(true);
/// ```
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    model: Model,
    alignment: Alignment,
    scale_to_width: bool,
}

impl Config {
    pub fn new(model: Model) -> Config {
        Config {
            model,
            alignment: Alignment::Left,
            scale_to_width: false,
        }
    }

    pub fn alignment(self, alignment: Alignment) -> Self {
        Config { alignment, ..self }
    }

    /// Scale the image so it spans the full print width of the model.
    pub fn scale_to_width(self, flag: bool) -> Self {
        Config {
            scale_to_width: flag,
            ..self
        }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.model.dots() == 0 {
            return Err(Error::InvalidConfig(format!(
                "{:?} has no printable dots",
                self.model
            )));
        }
        Ok(())
    }

    /// Convert encoded image bytes into the printer command stream.
    pub fn convert(&self, image: &[u8]) -> Result<Vec<u8>, Error> {
        self.validate()?;
        debug!("{:?}", self);

        let print_width = if self.scale_to_width {
            Some(self.model.dots())
        } else {
            None
        };
        let matrix = rasterize_with_width(image, print_width)?;
        Ok(encode(&matrix, self.alignment))
    }
}
