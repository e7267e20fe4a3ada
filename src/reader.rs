#[derive(Clone)]
pub struct Reader<'buf, T> {
    pub buffer: &'buf [T],
    pub cursor: usize,
}

impl<'rdr, T> Reader<'rdr, T> {
    pub fn at(buffer: &'rdr [T], cursor: usize) -> Reader<'rdr, T> {
        Reader { buffer, cursor: cursor.min(buffer.len()) }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }


    pub fn peek(&self) -> Option<&'rdr T> {
        self.buffer.get(self.cursor)
    }

    pub fn next(&mut self) -> Option<&'rdr T> {
        self.peek().map(|result| {
            self.cursor += 1;
            result
        })
    }


    pub fn has_n(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    pub fn peek_n(&self, n: usize) -> Option<&'rdr [T]> {
        if self.has_n(n) {
            return Some(&self.buffer[self.cursor .. self.cursor + n]);
        }
        None
    }

    pub fn next_n(&mut self, n: usize) -> Option<&'rdr [T]> {
        self.peek_n(n).map(|result| {
            self.cursor += n;
            result
        })
    }
}
