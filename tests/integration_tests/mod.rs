mod interpolation;
mod taylor_hood;
