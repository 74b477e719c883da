mod guest_token;
mod helpers;
