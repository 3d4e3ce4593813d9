//! Add-car form state: dependent dropdowns, validation, payload assembly.

use crate::errors::AppError;
use crate::models::{BodyType, CarModel, Condition, FuelType, ImageFile, NewCar, Transmission};

/// State behind the add-car form.
///
/// The model dropdown depends on the brand dropdown: changing the brand
/// clears the selected model and the option list until the new brand's
/// models arrive, and a model that does not belong to the current brand can
/// never remain selected.
#[derive(Debug, Clone)]
pub struct CarForm {
    brand: Option<String>,
    model: Option<String>,
    model_options: Vec<CarModel>,
    pub year: Option<i32>,
    pub price: Option<i64>,
    pub mileage: Option<i64>,
    pub km_run: Option<i64>,
    pub body_type: Option<BodyType>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub condition: Option<Condition>,
    pub color: String,
    pub city: String,
    pub description: String,
    pub is_approved: bool,
    pub is_featured: bool,
    pub is_sold: bool,
    images: Vec<ImageFile>,
}

impl Default for CarForm {
    fn default() -> Self {
        Self {
            brand: None,
            model: None,
            model_options: Vec::new(),
            year: None,
            price: None,
            mileage: None,
            km_run: None,
            body_type: None,
            fuel_type: None,
            transmission: None,
            condition: None,
            color: String::new(),
            city: String::new(),
            description: String::new(),
            // new listings start approved, matching the console's defaults
            is_approved: true,
            is_featured: false,
            is_sold: false,
            images: Vec::new(),
        }
    }
}

impl CarForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn model_options(&self) -> &[CarModel] {
        &self.model_options
    }

    /// Select a brand. Returns whether the model options must be refetched.
    pub fn select_brand(&mut self, brand_id: &str) -> bool {
        if self.brand.as_deref() == Some(brand_id) {
            return false;
        }
        self.brand = Some(brand_id.to_string());
        // the old brand's models are meaningless for the new brand
        self.model = None;
        self.model_options.clear();
        true
    }

    /// Install the freshly fetched model options for the current brand,
    /// dropping any selected model that is not among them.
    pub fn set_model_options(&mut self, options: Vec<CarModel>) {
        if let Some(selected) = &self.model {
            if !options.iter().any(|m| &m.id == selected) {
                self.model = None;
            }
        }
        self.model_options = options;
    }

    /// Select a model from the current options.
    pub fn select_model(&mut self, model_id: &str) -> Result<(), AppError> {
        if !self.model_options.iter().any(|m| m.id == model_id) {
            return Err(AppError::Validation(
                "Model does not belong to the selected brand".to_string(),
            ));
        }
        self.model = Some(model_id.to_string());
        Ok(())
    }

    pub fn add_image(&mut self, image: ImageFile) {
        self.images.push(image);
    }

    pub fn images(&self) -> &[ImageFile] {
        &self.images
    }

    /// Check the required fields, mirroring the starred form inputs.
    pub fn validate(&self) -> Result<(), AppError> {
        let missing = [
            ("brand", self.brand.is_none()),
            ("model", self.model.is_none()),
            ("year", self.year.is_none()),
            ("price", self.price.is_none()),
            ("body type", self.body_type.is_none()),
            ("fuel type", self.fuel_type.is_none()),
            ("transmission", self.transmission.is_none()),
            ("condition", self.condition.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Validate and produce the create payload.
    pub fn into_new_car(self) -> Result<NewCar, AppError> {
        self.validate()?;

        fn opt(text: String) -> Option<String> {
            let text = text.trim().to_string();
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }

        // validate() established these are present
        Ok(NewCar {
            brand: self.brand.unwrap_or_default(),
            model_name: self.model.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            mileage: self.mileage,
            km_run: self.km_run,
            body_type: self.body_type.unwrap_or(BodyType::Sedan),
            fuel_type: self.fuel_type.unwrap_or(FuelType::Petrol),
            transmission: self.transmission.unwrap_or(Transmission::Manual),
            condition: self.condition.unwrap_or(Condition::Used),
            color: opt(self.color),
            description: opt(self.description),
            city: opt(self.city),
            is_approved: self.is_approved,
            is_featured: self.is_featured,
            is_sold: self.is_sold,
            images: self.images,
        })
    }
}
