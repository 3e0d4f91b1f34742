/*
** This file is a part of chunked-element (incremental XML element builder)
** Copyright (C) 2000-2025 Gurer Ozen
**
** chunked-element is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::env;
use std::fs::File;
use std::io::Read;
use std::io::stdin;
use std::process::ExitCode;

use chunked_element::Element;
use chunked_element::ElementParser;
use chunked_element::Location;
use chunked_element::ParseError;
use chunked_element::TreeShape;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

fn print_version() {
    println!("elemdump (chunked-element) v{}", VERSION);
}

fn print_usage() {
    println!(
        concat!(
            "Usage: elemdump [OPTIONS] [FILE.xml...]\n",
            "This tool parses XML documents in chunks and prints the built element.\n",
            "Options:\n",
            "  -n, --nested         Attach nodes to their enclosing element\n",
            "  -b, --buffer <SIZE>  File read buffer size in bytes (default: {})\n",
            "  -h, --help           Display this help message and exit\n",
            "  -v, --version        Display the version and exit"
        ),
        DEFAULT_BUFFER_SIZE
    );
}

enum DumpError {
    IoError(std::io::Error),
    ParseError(ParseError, Location),
}

impl From<std::io::Error> for DumpError {
    fn from(err: std::io::Error) -> Self {
        DumpError::IoError(err)
    }
}

fn print_element(element: &Element, level: usize) {
    let indent = "  ".repeat(level);
    match element {
        Element::Text(text) => println!("{}{:?}", indent, text),
        Element::Tag { name, .. } => {
            let mut line = format!("{}{}", indent, name);
            for (key, value) in element.attributes() {
                line.push_str(&format!(" {}={:?}", key, value));
            }
            println!("{}", line);
            for child in element.children() {
                print_element(child, level + 1);
            }
        }
    }
}

fn parse_file(
    file: &str,
    is_stream: bool,
    shape: TreeShape,
    buffer_size: usize,
) -> Result<Element, DumpError> {
    let mut f: Box<dyn Read> = if is_stream {
        Box::new(stdin())
    } else {
        Box::new(File::open(file)?)
    };
    let mut root = Element::new();
    let mut parser = ElementParser::with_shape(shape)
        .map_err(|err| DumpError::ParseError(err, Location::default()))?;
    let mut buffer = vec![0u8; buffer_size];
    let mut target = Some(&mut root);
    loop {
        let bytes_read = f.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        let chunk = &buffer[..bytes_read];
        let result = match target.take() {
            Some(root) => parser.feed_into(chunk, root),
            None => parser.feed(chunk),
        };
        result.map_err(|err| DumpError::ParseError(err, parser.location()))?;
    }
    parser
        .finish()
        .map_err(|err| DumpError::ParseError(err, parser.location()))?;
    drop(parser);
    Ok(root)
}

fn dump_file(file: &str, is_stream: bool, shape: TreeShape, buffer_size: usize) -> bool {
    match parse_file(file, is_stream, shape, buffer_size) {
        Ok(root) => {
            print_element(&root, 0);
            true
        }
        Err(DumpError::IoError(e)) => {
            eprintln!("Error reading file '{}': {}", file, e);
            false
        }
        Err(DumpError::ParseError(err, location)) => {
            eprintln!(
                "Error in file '{}' at line {} column {}: {}",
                file, location.lines, location.column, err
            );
            false
        }
    }
}

fn main() -> ExitCode {
    let mut args = env::args();

    let mut files = Vec::new();
    let mut shape = TreeShape::Flat;
    let mut buffer_size = DEFAULT_BUFFER_SIZE;

    // Skip the first argument (program name)
    args.next();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" | "--nested" => {
                shape = TreeShape::Nested;
            }
            "-b" | "--buffer" => match args.next().map(|size| size.parse::<usize>()) {
                Some(Ok(size)) if size > 0 => buffer_size = size,
                Some(_) => {
                    eprintln!("Invalid buffer size");
                    return ExitCode::FAILURE;
                }
                None => {
                    eprintln!("Missing buffer size");
                    return ExitCode::FAILURE;
                }
            },
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            _ => {
                files.push(arg);
            }
        }
    }

    if files.is_empty() {
        if !dump_file("stdin", true, shape, buffer_size) {
            return ExitCode::FAILURE;
        }
    } else {
        for file in files {
            if !dump_file(&file, false, shape, buffer_size) {
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
