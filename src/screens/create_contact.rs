use super::{require, Alert, Outcome};
use crate::api::ContactsApi;
use crate::model::ContactForm;
use std::fmt;

#[derive(Debug, Default)]
pub struct CreateContactScreen {
    pub form: ContactForm,
}

impl CreateContactScreen {
    pub fn submit(&self, api: &dyn ContactsApi) -> Outcome {
        if let Err(alert) = require(&[("name", self.form.nome.as_str())]) {
            return Outcome::stay_with(alert);
        }
        match api.create_contact(&self.form) {
            Ok(_) => Outcome::back_with(Alert::success("Contact created!")),
            Err(err) => Outcome::stay_with(Alert::from_error("Saving contact", &err)),
        }
    }
}

impl fmt::Display for CreateContactScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== New contact ==")
    }
}
