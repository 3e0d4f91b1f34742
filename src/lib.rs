/*
** This file is a part of chunked-element (incremental XML element builder)
** Copyright (C) 2000-2025 Gurer Ozen
**
** chunked-element is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod builder;
mod element;
mod engine;

pub use engine::Location;
pub use engine::SaxAttributes;
pub use engine::SaxAttributesIter;
pub use engine::SaxEngine;
pub use engine::SaxError;
pub use engine::SaxEvent;
pub use engine::SaxHandler;
pub use engine::SaxHandlerError;
pub use engine::TEXT_FLUSH_SIZE;

pub use element::Element;
pub use element::ElementSink;

pub use builder::ElementParser;
pub use builder::ParseError;
pub use builder::RootLevel;
pub use builder::TreeShape;
