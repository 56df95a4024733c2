use axum::{
    Form,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use crate::models::ContactForm;

/// Contact form fields read from a `multipart/form-data` or
/// `application/x-www-form-urlencoded` body. Missing fields read as empty
/// strings, as does every field of any other body. A repeated field keeps its
/// last value.
#[derive(Debug)]
pub struct SubmittedForm(pub ContactForm);

impl<S> FromRequest<S> for SubmittedForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;

            let mut form = ContactForm::default();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(IntoResponse::into_response)?
            {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                let value = field.text().await.map_err(IntoResponse::into_response)?;
                if !form.set_field(&name, value) {
                    log::debug!("Ignoring unknown form field {}", name);
                }
            }
            return Ok(Self(form));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;

            let mut form = ContactForm::default();
            for (name, value) in pairs {
                if !form.set_field(&name, value) {
                    log::debug!("Ignoring unknown form field {}", name);
                }
            }
            return Ok(Self(form));
        }

        log::debug!(
            "No form payload (content type {:?}), using empty fields",
            content_type
        );
        Ok(Self(ContactForm::default()))
    }
}
