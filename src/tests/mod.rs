//! Properties of the whole codec, across tree construction, header and payload.
mod round_trip;
