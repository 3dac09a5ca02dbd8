pub mod public_http_server;
