mod request_params;
