use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

/// Answers every request with the same empty response. Returns the base URL.
pub fn serve(status: &str, headers: &[(&str, &str)]) -> String {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let addr = listener.local_addr().unwrap();

	let mut response = format!("HTTP/1.1 {}\r\n", status);
	for (name, value) in headers {
		response.push_str(&format!("{}: {}\r\n", name, value));
	}
	response.push_str("Content-Length: 0\r\nConnection: close\r\n\r\n");

	thread::spawn(move || {
		for stream in listener.incoming() {
			let Ok(mut stream) = stream else { continue };
			let Ok(read_half) = stream.try_clone() else { continue };

			let mut reader = BufReader::new(read_half);
			let mut line = String::new();
			while matches!(reader.read_line(&mut line), Ok(n) if n > 0) {
				if line == "\r\n" {
					break;
				}
				line.clear();
			}

			let _ = stream.write_all(response.as_bytes());
		}
	});

	format!("http://{}", addr)
}
