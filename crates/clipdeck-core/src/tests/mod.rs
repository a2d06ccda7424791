mod fakes;
mod music;
mod overlay;
mod timer;
