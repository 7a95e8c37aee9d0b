use actix_web::{web, HttpRequest, HttpResponse};

use crate::{
    entities::contact_me::{ContactForm, RequestMeta},
    errors::AppError,
    utils::get_client_ip::{get_client_ip, get_user_agent},
    AppState,
};

pub async fn create_contact_message(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<HttpResponse, AppError> {
    let meta = RequestMeta {
        source_address: get_client_ip(&req, state.trust_x_forwarded_for),
        client_agent: get_user_agent(&req),
    };

    let response = state.contact_handler
        .submit_contact_message(form.into_inner(), meta).await?;

    Ok(HttpResponse::Ok().json(response))
}
