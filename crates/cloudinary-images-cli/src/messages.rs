use cloudinary_images::AdminError;

/// Operator hint for an Admin API status code.
pub fn status_hint(status: u16) -> &'static str {
    match status {
        AdminError::NO_RESPONSE => "no response from Cloudinary; check network access",
        200 => "ok",
        400 => "bad request; check the size's dimensions and crop",
        401 => "authorization failed; check the API key and secret",
        403 => "not allowed for this account",
        404 => "not found",
        409 => "already exists",
        420 | 429 => "rate limited; try again later",
        500..=599 => "Cloudinary reported a server error; try again later",
        _ => "unexpected response",
    }
}
