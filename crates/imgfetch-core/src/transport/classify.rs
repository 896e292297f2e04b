//! Map curl errors onto transport error kinds.

use super::TransportError;

/// Classify a curl error: timeout, connection-level failure, or anything else.
pub fn classify_curl_error(e: &curl::Error) -> TransportError {
    if e.is_operation_timedout() {
        return TransportError::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportError::Connection(e.to_string());
    }
    TransportError::Other(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Raw libcurl codes: 3 URL_MALFORMAT, 6 COULDNT_RESOLVE_HOST,
    // 7 COULDNT_CONNECT, 28 OPERATION_TIMEDOUT, 52 GOT_NOTHING.

    #[test]
    fn timeout() {
        assert!(matches!(
            classify_curl_error(&curl::Error::new(28)),
            TransportError::Timeout
        ));
    }

    #[test]
    fn connection_failures() {
        for code in [6, 7, 52] {
            assert!(
                matches!(
                    classify_curl_error(&curl::Error::new(code)),
                    TransportError::Connection(_)
                ),
                "code {}",
                code
            );
        }
    }

    #[test]
    fn everything_else_is_other() {
        assert!(matches!(
            classify_curl_error(&curl::Error::new(3)),
            TransportError::Other(_)
        ));
    }
}
