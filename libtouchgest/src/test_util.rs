use recognizer::Listener;

#[derive(Clone, Debug, PartialEq)]
pub enum Call<T> {
    Begin(T),
    Update(T),
    End(T),
}

/// A listener that remembers every callback.
#[derive(Clone, Debug)]
pub struct Recorder<T> {
    pub calls: Vec<Call<T>>,
    pub claim: bool,
    pub consume: bool,
}

impl<T> Recorder<T> {
    pub fn new() -> Recorder<T> {
        Recorder {
            calls: vec![],
            claim: true,
            consume: true,
        }
    }

    pub fn updates(&self) -> Vec<&T> {
        self.calls.iter()
            .filter_map(|c| match *c { Call::Update(ref t) => Some(t), _ => None })
            .collect()
    }

    pub fn count_begins(&self) -> usize {
        self.calls.iter().filter(|c| match **c { Call::Begin(_) => true, _ => false }).count()
    }

    pub fn count_ends(&self) -> usize {
        self.calls.iter().filter(|c| match **c { Call::End(_) => true, _ => false }).count()
    }
}

impl<T: Clone> Listener<T> for Recorder<T> {
    fn begin(&mut self, info: &T) -> bool {
        self.calls.push(Call::Begin(info.clone()));
        self.claim
    }

    fn update(&mut self, info: &T) -> bool {
        self.calls.push(Call::Update(info.clone()));
        self.consume
    }

    fn end(&mut self, info: &T) {
        self.calls.push(Call::End(info.clone()));
    }
}
